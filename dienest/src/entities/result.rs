use crate::entities::{DieLineId, LayoutMetrics, PlacedDieLine, Sheet};

/// Outcome of a nesting run.
#[derive(Clone, Debug, PartialEq)]
pub struct NestingResult {
    /// The sheet that was used, synthesized by the size search if `is_optimized_size`
    pub sheet: Sheet,
    /// Accepted placements, in acceptance order
    pub placements: Vec<PlacedDieLine>,
    /// Die-line units that could not be placed, in the order they were attempted
    pub unplaced: Vec<DieLineId>,
    /// Number of die-line units that were requested
    pub n_requested: usize,
    pub metrics: LayoutMetrics,
    /// True if the sheet dimensions were selected by the sheet-size search
    pub is_optimized_size: bool,
}

impl NestingResult {
    pub fn utilization(&self) -> f64 {
        self.metrics.utilization
    }

    pub fn waste(&self) -> f64 {
        self.metrics.waste
    }

    pub fn n_placed(&self) -> usize {
        self.placements.len()
    }

    /// True if every requested unit was placed.
    pub fn is_complete(&self) -> bool {
        self.placements.len() == self.n_requested
    }
}
