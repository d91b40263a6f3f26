use serde::{Deserialize, Serialize};

use crate::catalog::DieLineLookup;
use crate::entities::{PlacedDieLine, Sheet};
use crate::error::NestingError;

/// Area-based metrics of a set of placements on a sheet.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct LayoutMetrics {
    /// Area of the full sheet rectangle, margins included
    pub total_area: f64,
    /// Sum of the unrotated nominal areas of all placed die lines
    pub used_area: f64,
    /// `used_area / total_area` as a percentage
    pub utilization: f64,
    /// `100 - utilization`
    pub waste: f64,
}

impl LayoutMetrics {
    /// Both percentages are 0 for a sheet without area.
    pub fn from_areas(total_area: f64, used_area: f64) -> Self {
        if total_area <= 0.0 || !total_area.is_finite() {
            return LayoutMetrics {
                total_area,
                used_area,
                utilization: 0.0,
                waste: 0.0,
            };
        }
        let utilization = used_area / total_area * 100.0;
        LayoutMetrics {
            total_area,
            used_area,
            utilization,
            waste: 100.0 - utilization,
        }
    }

    /// Resolves the die line of every placement through `lookup`.
    pub fn compute(
        sheet: &Sheet,
        placements: &[PlacedDieLine],
        lookup: &impl DieLineLookup,
    ) -> Result<Self, NestingError> {
        let used_area = placements.iter().try_fold(0.0, |acc, p| {
            let die_line = lookup
                .die_line(p.die_line_id)
                .ok_or(NestingError::DieLineNotFound(p.die_line_id))?;
            Ok::<f64, NestingError>(acc + die_line.nominal_area() * p.quantity as f64)
        })?;
        Ok(LayoutMetrics::from_areas(sheet.area(), used_area))
    }
}
