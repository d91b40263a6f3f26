use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::geometry::geo_enums::Rotation;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::primitives::{Outline, Point, Rect};
use crate::geometry::{PlacedShape, Transformation, bounding_box_of};

/// Unique identifier of a [`DieLine`] in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DieLineId(pub u64);

impl Display for DieLineId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The cut/crease outline of one unit to be reproduced on stock material.
/// Immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct DieLine {
    pub id: DieLineId,
    /// Name of the file the die line was extracted from (informational)
    pub name: String,
    /// Format of the source file, e.g. `PDF` or `DXF` (informational)
    pub file_type: String,
    /// Nominal width of the bounding box
    pub width: f64,
    /// Nominal height of the bounding box
    pub height: f64,
    /// Outline in local coordinates, centered in the nominal box `[0, width] × [0, height]`
    pub outline: Outline,
}

impl DieLine {
    /// Creates a die line from its nominal dimensions and an optional outline.
    /// Without an outline, the die line is represented by its bounding rectangle.
    pub fn new(
        id: DieLineId,
        width: f64,
        height: f64,
        outline: Option<Vec<Point>>,
    ) -> Result<Self, InputError> {
        let nominal_box = Rect::try_new(0.0, 0.0, width, height)
            .map_err(|_| InputError::InvalidDieLineDimensions { id, width, height })?;

        let outline = match outline {
            None => Outline::from(nominal_box),
            Some(points) => {
                let outline = Outline::new(points)?.normalized();
                let (o_w, o_h) = (outline.bbox.width(), outline.bbox.height());
                let tolerance = 1e-6 * f64::max(width, height);
                if o_w > width + tolerance || o_h > height + tolerance {
                    return Err(InputError::OutlineExceedsBox {
                        id,
                        outline_width: o_w,
                        outline_height: o_h,
                        width,
                        height,
                    });
                }
                let center = Transformation::from_translation(((width - o_w) / 2.0, (height - o_h) / 2.0));
                outline.transform_clone(&center)
            }
        };

        Ok(DieLine {
            id,
            name: String::new(),
            file_type: String::new(),
            width,
            height,
            outline,
        })
    }

    pub fn rectangular(id: DieLineId, width: f64, height: f64) -> Result<Self, InputError> {
        DieLine::new(id, width, height, None)
    }

    pub fn with_source(mut self, name: impl Into<String>, file_type: impl Into<String>) -> Self {
        self.name = name.into();
        self.file_type = file_type.into();
        self
    }

    /// Unrotated nominal area, rotation never changes it.
    pub fn nominal_area(&self) -> f64 {
        self.width * self.height
    }

    /// Nominal box of the die line, with its min corner at the origin.
    pub fn nominal_box(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.width,
            y_max: self.height,
        }
    }

    /// Width and height of the bounding box after applying `rotation`.
    pub fn footprint(&self, rotation: Rotation) -> (f64, f64) {
        bounding_box_of(&self.nominal_box(), rotation)
    }

    /// Rotated bounding box with its min corner at `position`.
    pub fn bbox_at(&self, rotation: Rotation, position: Point) -> Rect {
        let (w, h) = self.footprint(rotation);
        Rect {
            x_min: position.0,
            y_min: position.1,
            x_max: position.0 + w,
            y_max: position.1 + h,
        }
    }

    /// The die line rotated about the center of its nominal box,
    /// then translated so the min corner of the rotated box lies at `position`.
    pub fn placed_shape(&self, rotation: Rotation, position: Point) -> PlacedShape {
        let bbox = self.bbox_at(rotation, position);
        let (w, h) = self.footprint(rotation);
        let t = Transformation::from_translation((-self.width / 2.0, -self.height / 2.0))
            .rotate(rotation)
            .translate((position.0 + w / 2.0, position.1 + h / 2.0));
        PlacedShape {
            bbox,
            outline: self.outline.transform_clone(&t),
        }
    }
}
