mod overlap;
mod transformation;

pub mod geo_enums;
pub mod geo_traits;
pub mod primitives;

#[doc(inline)]
pub use overlap::{OverlapMode, PlacedShape, bounding_box_of, overlaps, within};
#[doc(inline)]
pub use transformation::Transformation;
