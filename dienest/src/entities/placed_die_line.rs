use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::entities::DieLineId;
use crate::geometry::geo_enums::Rotation;
use crate::geometry::primitives::Point;

/// Unique identifier of a [`PlacedDieLine`] within a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(pub u64);

impl Display for PlacementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One unit of a die line placed on a sheet.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlacedDieLine {
    pub id: PlacementId,
    pub die_line_id: DieLineId,
    /// Min corner of the rotated bounding box, in sheet coordinates
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
    /// Always 1, multiplicity is expressed by one record per unit
    pub quantity: u32,
}

impl PlacedDieLine {
    pub fn new(id: PlacementId, die_line_id: DieLineId, position: Point, rotation: Rotation) -> Self {
        Self {
            id,
            die_line_id,
            x: position.0,
            y: position.1,
            rotation,
            quantity: 1,
        }
    }

    pub fn position(&self) -> Point {
        Point(self.x, self.y)
    }
}
