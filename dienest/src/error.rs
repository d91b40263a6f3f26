use thiserror::Error;

use crate::entities::{DieLineId, PlacementId, SheetId, SheetSizeRange};
use crate::geometry::primitives::Rect;

/// Malformed geometric input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("outline must have at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("outline contains a non-finite coordinate ({0}, {1})")]
    NonFiniteCoordinate(f64, f64),
    #[error("outline encloses no area")]
    ZeroArea,
    #[error("invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}")]
    InvalidRect {
        x_min: f64,
        y_min: f64,
        x_max: f64,
        y_max: f64,
    },
    #[error("{0}° is not a quarter turn (expected 0, 90, 180 or 270)")]
    InvalidRotation(f64),
}

/// Requests rejected before any placement is attempted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("die line {id} has invalid dimensions {width}x{height}")]
    InvalidDieLineDimensions { id: DieLineId, width: f64, height: f64 },
    #[error(
        "outline of die line {id} ({outline_width}x{outline_height}) exceeds its nominal box {width}x{height}"
    )]
    OutlineExceedsBox {
        id: DieLineId,
        outline_width: f64,
        outline_height: f64,
        width: f64,
        height: f64,
    },
    #[error("sheet of {width}x{height} leaves no usable interior with margins {margins:?}")]
    InvalidSheetDimensions {
        width: f64,
        height: f64,
        margins: [f64; 4],
    },
    #[error("spacing must be finite and non-negative, got {0}")]
    InvalidSpacing(f64),
    #[error("max_iterations must be greater than 0")]
    ZeroIterations,
    #[error("the set of allowed rotations is empty")]
    EmptyRotationSet,
    #[error("0° must be allowed when rotation is disabled")]
    MissingZeroRotation,
    #[error("invalid sheet size range {0}")]
    InvalidSizeRange(SheetSizeRange),
    #[error("no sheet selected, provide a sheet id or a sheet size range")]
    MissingSheet,
}

/// Every failure the engine surfaces to its callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NestingError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
    #[error("sheet {0} not found")]
    SheetNotFound(SheetId),
    #[error("die line {0} not found")]
    DieLineNotFound(DieLineId),
    #[error("placement {0} not found")]
    PlacementNotFound(PlacementId),
    #[error("no die lines to place")]
    NoDieLinesToPlace,
    #[error(
        "sheet size range {range} cannot hold the largest die line, at least {required_width}x{required_height} is required"
    )]
    SizeRangeInfeasible {
        range: SheetSizeRange,
        required_width: f64,
        required_height: f64,
    },
    #[error("could not fit all die lines within sheet size range {0}")]
    SizeRangeExhausted(SheetSizeRange),
    #[error("placement {placement_id} would collide with placements {conflicts:?}")]
    CollisionDetected {
        placement_id: PlacementId,
        conflicts: Vec<PlacementId>,
    },
    #[error("placement {placement_id} at {bbox:?} leaves the usable interior {interior:?}")]
    OutOfBounds {
        placement_id: PlacementId,
        bbox: Rect,
        interior: Rect,
    },
}

impl From<GeometryError> for NestingError {
    fn from(err: GeometryError) -> Self {
        NestingError::Input(InputError::Geometry(err))
    }
}
