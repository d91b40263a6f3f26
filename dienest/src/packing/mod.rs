mod adjust;
mod session;
mod shelf;
mod size_search;

#[doc(inline)]
pub use adjust::{Adjustment, CollisionGuard, adjust_placement};
#[doc(inline)]
pub use session::LayoutSession;
#[doc(inline)]
pub use shelf::{PackingOutcome, pack_sheet, placement_order};
#[doc(inline)]
pub use size_search::{SizeSearchOutcome, candidate_sizes, search_sheet_size};

use std::sync::Arc;

use crate::entities::DieLine;

/// A die line together with the number of units to place.
pub type Demand = (Arc<DieLine>, usize);
