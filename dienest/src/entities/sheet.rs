use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::geometry::primitives::Rect;

/// Unique identifier of a [`Sheet`] in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetId(pub u64);

impl SheetId {
    /// Identity of a sheet that has not been stored in a catalog yet.
    pub const UNASSIGNED: SheetId = SheetId(u64::MAX);
}

impl Display for SheetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Distance between each edge of a sheet and its usable interior.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    pub fn uniform(margin: f64) -> Self {
        Self {
            top: margin,
            bottom: margin,
            left: margin,
            right: margin,
        }
    }

    fn as_array(&self) -> [f64; 4] {
        [self.top, self.bottom, self.left, self.right]
    }
}

/// All fields of a [`Sheet`] except its identity. Used to create a sheet or replace all its fields at once.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SheetRequest {
    #[serde(default)]
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub material: String,
}

/// Rectangular stock sheet onto which die lines are nested.
///
/// Sheet coordinates span `[0, width] × [0, height]`, the usable interior is what remains after
/// removing the margins. Shelves start at the `(left, top)` margin corner and rows grow along +y.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    pub id: SheetId,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    /// Informational only, never used by the algorithms
    pub material: String,
}

impl Sheet {
    /// Validates `request` and assigns it the identity `id`.
    pub fn new(id: SheetId, request: SheetRequest) -> Result<Self, InputError> {
        let SheetRequest {
            name,
            width,
            height,
            margins,
            material,
        } = request;

        let margins_valid = margins.as_array().iter().all(|m| m.is_finite() && *m >= 0.0);
        let interior_valid = margins.left + margins.right < width && margins.top + margins.bottom < height;
        if !(width.is_finite() && height.is_finite() && margins_valid && interior_valid) {
            return Err(InputError::InvalidSheetDimensions {
                width,
                height,
                margins: margins.as_array(),
            });
        }

        Ok(Sheet {
            id,
            name,
            width,
            height,
            margins,
            material,
        })
    }

    /// Area of the full sheet rectangle, margins included.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn outer_rect(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.width,
            y_max: self.height,
        }
    }

    /// The sheet rectangle minus its margins.
    pub fn usable_interior(&self) -> Rect {
        Rect {
            x_min: self.margins.left,
            y_min: self.margins.top,
            x_max: self.width - self.margins.right,
            y_max: self.height - self.margins.bottom,
        }
    }

    pub fn to_request(&self) -> SheetRequest {
        SheetRequest {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            margins: self.margins,
            material: self.material.clone(),
        }
    }
}
