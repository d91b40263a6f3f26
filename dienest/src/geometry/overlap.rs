use serde::{Deserialize, Serialize};

use crate::geometry::geo_enums::Rotation;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Outline, Rect};

/// Width and height of the bounding box of `shape` after rotating it about its center.
pub fn bounding_box_of(shape: &impl Shape, rotation: Rotation) -> (f64, f64) {
    let bbox = shape.bbox();
    let (w, h) = (bbox.width(), bbox.height());
    match rotation.swaps_axes() {
        true => (h, w),
        false => (w, h),
    }
}

/// True if the projections of `a` and `b` intersect by more than `epsilon` on both axes.
/// Rectangles that only touch along an edge do not overlap.
pub fn overlaps(a: &Rect, b: &Rect, epsilon: f64) -> bool {
    let dx = f64::min(a.x_max, b.x_max) - f64::max(a.x_min, b.x_min);
    let dy = f64::min(a.y_max, b.y_max) - f64::max(a.y_min, b.y_min);
    dx > epsilon && dy > epsilon
}

/// True if all edges of `rect` lie inside or on the edges of `container` (within `epsilon`).
pub fn within(rect: &Rect, container: &Rect, epsilon: f64) -> bool {
    rect.x_min >= container.x_min - epsilon
        && rect.y_min >= container.y_min - epsilon
        && rect.x_max <= container.x_max + epsilon
        && rect.y_max <= container.y_max + epsilon
}

/// Fidelity of the collision test between two placed die lines.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapMode {
    /// Placed die lines collide when their rotated bounding boxes overlap.
    #[default]
    BoundingBox,
    /// Placed die lines collide when their outlines overlap.
    /// Bounding boxes are still tested first.
    Polygon,
}

/// A die line as it lies on the sheet: its rotated bounding box and its transformed outline.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedShape {
    pub bbox: Rect,
    pub outline: Outline,
}

impl PlacedShape {
    /// Tests `self`, grown by `clearance` on every side, against `other`.
    pub fn collides_with(
        &self,
        other: &PlacedShape,
        clearance: f64,
        mode: OverlapMode,
        epsilon: f64,
    ) -> bool {
        let grown = self.bbox.inflate(clearance).unwrap_or(self.bbox);
        if !overlaps(&grown, &other.bbox, epsilon) {
            return false;
        }
        match mode {
            OverlapMode::BoundingBox => true,
            OverlapMode::Polygon => {
                outlines_overlap(&self.outline, &other.outline, epsilon)
                    || (clearance > 0.0
                        && outline_distance(&self.outline, &other.outline) < clearance - epsilon)
            }
        }
    }
}

/// Distance between two non-overlapping outlines,
/// attained between a vertex of one and an edge of the other.
fn outline_distance(a: &Outline, b: &Outline) -> f64 {
    let a_to_b = a.vertices.iter().map(|p| b.distance_to_boundary(p));
    let b_to_a = b.vertices.iter().map(|p| a.distance_to_boundary(p));
    a_to_b.chain(b_to_a).fold(f64::INFINITY, f64::min)
}

fn outlines_overlap(a: &Outline, b: &Outline, epsilon: f64) -> bool {
    if !overlaps(&a.bbox, &b.bbox, epsilon) {
        return false;
    }
    //proper crossing of two edges
    let crossing = a
        .edge_iter()
        .any(|e_a| b.edge_iter().any(|e_b| e_a.crosses(&e_b, epsilon)));
    if crossing {
        return true;
    }
    //no crossings: either disjoint, touching, or one contains (part of) the other
    let vertex_inside = a.vertices.iter().any(|p| b.strictly_contains(p, epsilon))
        || b.vertices.iter().any(|p| a.strictly_contains(p, epsilon));
    if vertex_inside {
        return true;
    }
    b.strictly_contains(&a.interior_point(), epsilon) || a.strictly_contains(&b.interior_point(), epsilon)
}
