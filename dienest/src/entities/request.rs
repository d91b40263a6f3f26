use serde::{Deserialize, Serialize};

use crate::entities::{DieLineId, NestingOptions, SheetId};

/// Number of units of a die line to place.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DieLineQuantity {
    pub die_line_id: DieLineId,
    pub quantity: usize,
}

/// Input of [`NestingEngine::optimize`](crate::engine::NestingEngine::optimize).
///
/// The sheet is either fixed by `sheet_id`, or searched for when `options.sheet_size_range` is set.
/// A size range takes precedence over a sheet id.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NestingRequest {
    #[serde(default)]
    pub sheet_id: Option<SheetId>,
    pub die_lines: Vec<DieLineQuantity>,
    #[serde(default)]
    pub options: NestingOptions,
}

impl NestingRequest {
    /// Total number of die-line units requested.
    pub fn total_quantity(&self) -> usize {
        self.die_lines.iter().map(|dlq| dlq.quantity).sum()
    }
}
