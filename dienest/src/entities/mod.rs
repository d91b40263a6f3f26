mod die_line;
mod layout;
mod metrics;
mod options;
mod placed_die_line;
mod request;
mod result;
mod sheet;

#[doc(inline)]
pub use die_line::{DieLine, DieLineId};
#[doc(inline)]
pub use layout::Layout;
#[doc(inline)]
pub use metrics::LayoutMetrics;
#[doc(inline)]
pub use options::{NestingOptions, SheetSizeRange};
#[doc(inline)]
pub use placed_die_line::{PlacedDieLine, PlacementId};
#[doc(inline)]
pub use request::{DieLineQuantity, NestingRequest};
#[doc(inline)]
pub use result::NestingResult;
#[doc(inline)]
pub use sheet::{Margins, Sheet, SheetId, SheetRequest};
