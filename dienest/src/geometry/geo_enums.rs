use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Quarter-turn rotation of a die line about the center of its bounding box.
/// Serialized as its angle in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// All rotations, in the order in which the packer evaluates them.
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub fn degrees(self) -> f64 {
        match self {
            Rotation::Deg0 => 0.0,
            Rotation::Deg90 => 90.0,
            Rotation::Deg180 => 180.0,
            Rotation::Deg270 => 270.0,
        }
    }

    /// Accepts any multiple of 90° (negative angles and full turns are normalized).
    pub fn from_degrees(angle: f64) -> Result<Self, GeometryError> {
        if !angle.is_finite() {
            return Err(GeometryError::InvalidRotation(angle));
        }
        let normalized = angle.rem_euclid(360.0);
        Rotation::ALL
            .into_iter()
            .find(|r| (r.degrees() - normalized).abs() < 1e-9)
            .or_else(|| (360.0 - normalized < 1e-9).then_some(Rotation::Deg0))
            .ok_or(GeometryError::InvalidRotation(angle))
    }

    /// True if the rotation exchanges the width and height of a bounding box.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Exact (cos, sin) of the angle, avoiding the rounding noise of `f64::sin_cos`.
    pub fn cos_sin(self) -> (f64, f64) {
        match self {
            Rotation::Deg0 => (1.0, 0.0),
            Rotation::Deg90 => (0.0, 1.0),
            Rotation::Deg180 => (-1.0, 0.0),
            Rotation::Deg270 => (0.0, -1.0),
        }
    }
}

impl TryFrom<f64> for Rotation {
    type Error = GeometryError;

    fn try_from(angle: f64) -> Result<Self, Self::Error> {
        Rotation::from_degrees(angle)
    }
}

impl From<Rotation> for f64 {
    fn from(r: Rotation) -> Self {
        r.degrees()
    }
}

impl Display for Rotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
