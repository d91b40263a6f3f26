use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::DieLineLookup;
use crate::entities::{Layout, PlacedDieLine, PlacementId};
use crate::error::{InputError, NestingError};
use crate::geometry::geo_enums::Rotation;
use crate::geometry::primitives::Point;
use crate::geometry::{OverlapMode, within};

/// A request to move and/or rotate one placement of a layout.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Adjustment {
    pub placement_id: PlacementId,
    /// New min corner of the rotated bounding box
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
}

/// Parameters of the collision test applied to manual adjustments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionGuard {
    /// Clearance the moved placement must keep to every other placement
    pub spacing: f64,
    pub epsilon: f64,
    pub mode: OverlapMode,
}

impl CollisionGuard {
    pub fn new(spacing: f64, epsilon: f64, mode: OverlapMode) -> Result<Self, InputError> {
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(InputError::InvalidSpacing(spacing));
        }
        Ok(Self { spacing, epsilon, mode })
    }
}

/// Validates `adjustment` against `layout` and returns the updated list of placements.
///
/// The moved placement must lie within the usable interior of the sheet and, grown by the guard's spacing,
/// must not collide with any other placement. On rejection nothing is modified.
pub fn adjust_placement(
    layout: &Layout,
    adjustment: &Adjustment,
    guard: &CollisionGuard,
) -> Result<Vec<PlacedDieLine>, NestingError> {
    let Adjustment {
        placement_id,
        x,
        y,
        rotation,
    } = *adjustment;

    let target = layout
        .placement(placement_id)
        .ok_or(NestingError::PlacementNotFound(placement_id))?;
    let die_line = layout
        .die_line(target.die_line_id)
        .ok_or(NestingError::DieLineNotFound(target.die_line_id))?;

    let moved = die_line.placed_shape(rotation, Point(x, y));
    let interior = layout.sheet.usable_interior();

    if !within(&moved.bbox, &interior, guard.epsilon) {
        warn!("[ADJUST] rejected move of placement {placement_id}, {:?} leaves the usable interior", moved.bbox);
        return Err(NestingError::OutOfBounds {
            placement_id,
            bbox: moved.bbox,
            interior,
        });
    }

    let conflicts = layout
        .placements()
        .iter()
        .filter(|p| p.id != placement_id)
        .filter(|p| {
            layout
                .placed_shape(p)
                .is_some_and(|other| moved.collides_with(&other, guard.spacing, guard.mode, guard.epsilon))
        })
        .map(|p| p.id)
        .sorted()
        .collect_vec();

    if !conflicts.is_empty() {
        warn!("[ADJUST] rejected move of placement {placement_id}, collides with {conflicts:?}");
        return Err(NestingError::CollisionDetected {
            placement_id,
            conflicts,
        });
    }

    debug!("[ADJUST] moved placement {placement_id} to ({x}, {y}) with rotation {rotation}");

    let updated = layout
        .placements()
        .iter()
        .map(|p| match p.id == placement_id {
            true => PlacedDieLine {
                x,
                y,
                rotation,
                ..p.clone()
            },
            false => p.clone(),
        })
        .collect_vec();
    Ok(updated)
}
