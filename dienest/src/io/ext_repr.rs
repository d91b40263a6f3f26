use serde::{Deserialize, Serialize};

use crate::entities::NestingOptions;

/// External representation of a [`DieLine`](crate::entities::DieLine).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtDieLine {
    /// Unique identifier of the die line
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Format of the file the die line was extracted from
    #[serde(default)]
    pub file_type: String,
    pub width: f64,
    pub height: f64,
    /// Cut outline, represented by its nominal bounding box if not specified
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub outline: Option<ExtOutline>,
}

/// A closed polygon, the closing vertex may be omitted.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtOutline(pub Vec<(f64, f64)>);

/// External representation of [`Margins`](crate::entities::Margins).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct ExtMargins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// External representation of a [`Sheet`](crate::entities::Sheet).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSheet {
    /// Unique identifier of the sheet
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub margins: ExtMargins,
    #[serde(default)]
    pub material: String,
}

/// Number of units of a die line to place
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct ExtDemand {
    pub die_line_id: u64,
    pub quantity: usize,
}

/// External representation of a [`NestingRequest`](crate::entities::NestingRequest).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtNestingRequest {
    /// Sheet to nest onto, ignored if `options.sheet_size_range` is set
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sheet_id: Option<u64>,
    pub die_lines: Vec<ExtDemand>,
    #[serde(default)]
    pub options: NestingOptions,
}

/// External representation of a [`PlacedDieLine`](crate::entities::PlacedDieLine).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacedDieLine {
    pub id: u64,
    pub die_line_id: u64,
    /// Min corner of the rotated bounding box
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees (0, 90, 180 or 270)
    pub rotation: f64,
    pub quantity: u32,
}

/// External representation of a [`NestingResult`](crate::entities::NestingResult).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtNestingResult {
    /// The sheet that was used
    pub sheet: ExtSheet,
    pub placements: Vec<ExtPlacedDieLine>,
    /// Ids of the die lines of all units that could not be placed
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unplaced: Vec<u64>,
    pub total_area: f64,
    pub used_area: f64,
    /// Percentage of the sheet area covered by die lines
    pub utilization: f64,
    pub waste: f64,
    /// Whether the sheet dimensions were selected by the sheet-size search
    pub is_optimized_size: bool,
}

/// External representation of an [`Adjustment`](crate::packing::Adjustment).
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct ExtAdjustment {
    pub placement_id: u64,
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees (0, 90, 180 or 270)
    #[serde(default)]
    pub rotation: f64,
}

/// A complete nesting job: the catalog contents, the request and manual adjustments to replay afterwards.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtJob {
    pub name: String,
    pub die_lines: Vec<ExtDieLine>,
    #[serde(default)]
    pub sheets: Vec<ExtSheet>,
    pub request: ExtNestingRequest,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub adjustments: Vec<ExtAdjustment>,
}
