use itertools::Itertools;

use crate::entities::{Margins, NestingResult, PlacedDieLine, Sheet};
use crate::io::ext_repr::{ExtMargins, ExtNestingResult, ExtPlacedDieLine, ExtSheet};

pub fn export_margins(margins: &Margins) -> ExtMargins {
    ExtMargins {
        top: margins.top,
        bottom: margins.bottom,
        left: margins.left,
        right: margins.right,
    }
}

pub fn export_sheet(sheet: &Sheet) -> ExtSheet {
    ExtSheet {
        id: sheet.id.0,
        name: sheet.name.clone(),
        width: sheet.width,
        height: sheet.height,
        margins: export_margins(&sheet.margins),
        material: sheet.material.clone(),
    }
}

pub fn export_placed_die_line(placement: &PlacedDieLine) -> ExtPlacedDieLine {
    ExtPlacedDieLine {
        id: placement.id.0,
        die_line_id: placement.die_line_id.0,
        x: placement.x,
        y: placement.y,
        rotation: placement.rotation.degrees(),
        quantity: placement.quantity,
    }
}

/// Exports a [`NestingResult`] by composing an [`ExtNestingResult`] from it.
pub fn export_result(result: &NestingResult) -> ExtNestingResult {
    ExtNestingResult {
        sheet: export_sheet(&result.sheet),
        placements: result.placements.iter().map(export_placed_die_line).collect_vec(),
        unplaced: result.unplaced.iter().map(|id| id.0).collect_vec(),
        total_area: result.metrics.total_area,
        used_area: result.metrics.used_area,
        utilization: result.metrics.utilization,
        waste: result.metrics.waste,
        is_optimized_size: result.is_optimized_size,
    }
}
