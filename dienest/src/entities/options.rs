use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::geometry::geo_enums::Rotation;

/// Range of sheet dimensions within which the sheet-size search looks for a sheet.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct SheetSizeRange {
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl SheetSizeRange {
    pub fn validate(&self) -> Result<(), InputError> {
        let values = [self.min_width, self.max_width, self.min_height, self.max_height];
        let valid = values.iter().all(|v| v.is_finite() && *v > 0.0)
            && self.min_width <= self.max_width
            && self.min_height <= self.max_height;
        match valid {
            true => Ok(()),
            false => Err(InputError::InvalidSizeRange(*self)),
        }
    }
}

impl Display for SheetSizeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} to {}x{}",
            self.min_width, self.min_height, self.max_width, self.max_height
        )
    }
}

/// Options steering a nesting run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct NestingOptions {
    /// Minimum clearance between pieces, and between a piece and the far edges of the usable interior
    pub spacing: f64,
    /// If false, only 0° is tried regardless of `allowed_rotations`
    pub allow_rotation: bool,
    /// Rotations the packer may use
    pub allowed_rotations: Vec<Rotation>,
    /// Hard cap on the number of placement attempts (one per die-line instance)
    pub max_iterations: usize,
    /// If set, the sheet is not fixed but searched for within this range
    pub sheet_size_range: Option<SheetSizeRange>,
}

impl Default for NestingOptions {
    fn default() -> Self {
        Self {
            spacing: 5.0,
            allow_rotation: true,
            allowed_rotations: Rotation::ALL.to_vec(),
            max_iterations: 1000,
            sheet_size_range: None,
        }
    }
}

impl NestingOptions {
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(InputError::InvalidSpacing(self.spacing));
        }
        if self.max_iterations == 0 {
            return Err(InputError::ZeroIterations);
        }
        if self.allowed_rotations.is_empty() {
            return Err(InputError::EmptyRotationSet);
        }
        if !self.allow_rotation && !self.allowed_rotations.contains(&Rotation::Deg0) {
            return Err(InputError::MissingZeroRotation);
        }
        if let Some(range) = &self.sheet_size_range {
            range.validate()?;
        }
        Ok(())
    }

    /// Rotations to evaluate for every instance, in the fixed order 0°, 90°, 180°, 270°.
    pub fn candidate_rotations(&self) -> Vec<Rotation> {
        match self.allow_rotation {
            true => Rotation::ALL
                .into_iter()
                .filter(|r| self.allowed_rotations.contains(r))
                .collect(),
            false => vec![Rotation::Deg0],
        }
    }
}
