use itertools::Itertools;
use log::error;

use crate::entities::{Layout, LayoutMetrics, PlacementId};
use crate::geometry::primitives::Rect;
use crate::geometry::{overlaps, within};
use crate::packing::CollisionGuard;

//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

/// Every box lies within `interior`, and no two boxes, one of them grown by `spacing`, overlap.
pub fn boxes_are_feasible(interior: &Rect, boxes: &[(PlacementId, Rect)], spacing: f64, epsilon: f64) -> bool {
    for (id, bbox) in boxes {
        if !within(bbox, interior, epsilon) {
            error!("[ASSERT] placement {id} at {bbox:?} exceeds the interior {interior:?}");
            return false;
        }
    }
    for ((id_a, a), (id_b, b)) in boxes.iter().tuple_combinations() {
        let grown = a.inflate(spacing).unwrap_or(*a);
        if overlaps(&grown, b, epsilon) {
            error!("[ASSERT] placements {id_a} and {id_b} are closer than {spacing}");
            return false;
        }
    }
    true
}

/// All placements of the layout are within the interior and mutually free of collisions under `guard`.
pub fn layout_is_feasible(layout: &Layout, guard: &CollisionGuard) -> bool {
    let interior = layout.sheet.usable_interior();
    let shapes = layout
        .placements()
        .iter()
        .map(|p| (p.id, layout.placed_shape(p)))
        .collect_vec();

    if shapes.iter().any(|(_, s)| s.is_none()) {
        error!("[ASSERT] layout references a die line it does not contain");
        return false;
    }
    let shapes = shapes.into_iter().filter_map(|(id, s)| s.map(|s| (id, s))).collect_vec();

    if let Some((id, _)) = shapes.iter().find(|(_, s)| !within(&s.bbox, &interior, guard.epsilon)) {
        error!("[ASSERT] placement {id} exceeds the interior {interior:?}");
        return false;
    }
    shapes.iter().tuple_combinations().all(|((id_a, a), (id_b, b))| {
        let collides = a.collides_with(b, guard.spacing, guard.mode, guard.epsilon);
        if collides {
            error!("[ASSERT] placements {id_a} and {id_b} collide");
        }
        !collides
    })
}

pub fn metrics_are_consistent(metrics: &LayoutMetrics) -> bool {
    let LayoutMetrics {
        total_area,
        used_area,
        utilization,
        waste,
    } = *metrics;
    match total_area > 0.0 {
        true => {
            used_area <= total_area * (1.0 + 1e-9)
                && (0.0..=100.0 + 1e-9).contains(&utilization)
                && float_cmp::approx_eq!(f64, utilization + waste, 100.0, epsilon = 1e-9)
        }
        false => utilization == 0.0 && waste == 0.0,
    }
}
