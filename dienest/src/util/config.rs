use serde::{Deserialize, Serialize};

use crate::geometry::OverlapMode;

///Configuration of the nesting engine
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    ///Tolerance below which intersections and boundary violations are ignored
    pub epsilon: f64,
    ///Fidelity of the collision guard used for manual adjustments
    pub overlap_mode: OverlapMode,
    ///Configuration of the sheet-size search
    pub size_search: SizeSearchConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            overlap_mode: OverlapMode::BoundingBox,
            size_search: SizeSearchConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct SizeSearchConfig {
    ///Number of equal steps each axis of the size range is divided into
    pub n_steps: usize,
    ///Margin applied to all four sides of every candidate sheet
    pub sheet_margin: f64,
}

impl Default for SizeSearchConfig {
    fn default() -> Self {
        Self {
            n_steps: 5,
            sheet_margin: 10.0,
        }
    }
}
