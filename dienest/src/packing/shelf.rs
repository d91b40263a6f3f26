use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info};
use ordered_float::OrderedFloat;

use crate::entities::{DieLine, DieLineId, LayoutMetrics, NestingOptions, PlacedDieLine, PlacementId, Sheet};
use crate::error::InputError;
use crate::geometry::geo_enums::Rotation;
use crate::geometry::primitives::{Point, Rect};
use crate::packing::Demand;
use crate::util::{FPA, assertions};

/// Result of packing die lines onto a single sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct PackingOutcome {
    /// Accepted placements, ids assigned in acceptance order
    pub placements: Vec<PlacedDieLine>,
    /// Units that were skipped or never attempted, in placement order
    pub unplaced: Vec<DieLineId>,
    pub n_requested: usize,
    pub metrics: LayoutMetrics,
}

impl PackingOutcome {
    pub fn is_complete(&self) -> bool {
        self.placements.len() == self.n_requested
    }
}

/// Expands every demand into its individual units, ordered by
/// nominal area (descending), width (descending) and die-line id (ascending).
pub fn placement_order(demands: &[Demand]) -> Vec<Arc<DieLine>> {
    demands
        .iter()
        .flat_map(|(dl, qty)| std::iter::repeat_n(dl.clone(), *qty))
        .sorted_by_key(|dl| {
            (
                Reverse(OrderedFloat(dl.nominal_area())),
                Reverse(OrderedFloat(dl.width)),
                dl.id,
            )
        })
        .collect_vec()
}

/// Position of the next placement on the current row.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Cursor {
    x: f64,
    y: f64,
    /// Tallest footprint plus spacing on the current row, 0 while the row is empty
    row_height: f64,
}

impl Cursor {
    fn origin(interior: &Rect) -> Self {
        Cursor {
            x: interior.x_min,
            y: interior.y_min,
            row_height: 0.0,
        }
    }

    fn row_is_empty(&self) -> bool {
        self.row_height == 0.0
    }

    fn next_row(&self, interior: &Rect, spacing: f64) -> Self {
        Cursor {
            x: interior.x_min,
            y: self.y + self.row_height + spacing,
            row_height: 0.0,
        }
    }

    /// First rotation, in evaluation order, whose footprint plus trailing spacing fits in the
    /// remaining width of the row. The remaining height is not considered.
    fn first_fit(
        &self,
        die_line: &DieLine,
        rotations: &[Rotation],
        spacing: f64,
        interior: &Rect,
    ) -> Option<(Rotation, f64, f64)> {
        rotations.iter().find_map(|&r| {
            let (w, h) = die_line.footprint(r);
            let fits = FPA(self.x + w + spacing) <= FPA(interior.x_max);
            fits.then_some((r, w, h))
        })
    }

    fn fits_vertically(&self, h: f64, spacing: f64, interior: &Rect) -> bool {
        FPA(self.y + h + spacing) <= FPA(interior.y_max)
    }

    fn advance(&self, w: f64, h: f64, spacing: f64) -> Self {
        Cursor {
            x: self.x + w + spacing,
            y: self.y,
            row_height: f64::max(self.row_height, h + spacing),
        }
    }
}

#[derive(Clone, Debug, Default)]
struct ShelfState {
    cursor: Option<Cursor>,
    placements: Vec<PlacedDieLine>,
    unplaced: Vec<DieLineId>,
    used_area: f64,
}

impl ShelfState {
    fn place(mut self, die_line: &DieLine, rotations: &[Rotation], spacing: f64, interior: &Rect) -> Self {
        let cursor = self.cursor.unwrap_or(Cursor::origin(interior));

        //choose a rotation on the current row, otherwise on a new row
        let (cursor, choice) = match cursor.first_fit(die_line, rotations, spacing, interior) {
            Some(choice) => (cursor, Some(choice)),
            None if !cursor.row_is_empty() => {
                let next = cursor.next_row(interior, spacing);
                (next, next.first_fit(die_line, rotations, spacing, interior))
            }
            None => (cursor, None),
        };

        //the chosen rotation must also fit the remaining height, a new row is kept either way
        let fit = choice.filter(|&(_, _, h)| cursor.fits_vertically(h, spacing, interior));

        match fit {
            Some((rotation, w, h)) => {
                let id = PlacementId(self.placements.len() as u64);
                debug!(
                    "[SHELF] placing die line {} as placement {} at ({}, {}) with rotation {}",
                    die_line.id, id, cursor.x, cursor.y, rotation
                );
                self.placements
                    .push(PlacedDieLine::new(id, die_line.id, Point(cursor.x, cursor.y), rotation));
                self.cursor = Some(cursor.advance(w, h, spacing));
                self.used_area += die_line.nominal_area();
            }
            None => {
                debug!("[SHELF] die line {} does not fit, skipping", die_line.id);
                self.cursor = Some(cursor);
                self.unplaced.push(die_line.id);
            }
        }
        self
    }
}

/// Packs the demanded die lines onto `sheet` in rows (shelves), starting at the top-left margin corner.
///
/// Units are visited in [`placement_order`]. The rotation is the first one whose width fits the current row,
/// otherwise a new row is opened below a non-empty current row and the first one fitting its width is taken.
/// The unit is placed if that rotation also fits the remaining height, otherwise it is skipped
/// and the cursor stays on the opened row.
/// At most `options.max_iterations` units are attempted, the remainder is reported as unplaced.
pub fn pack_sheet(sheet: &Sheet, demands: &[Demand], options: &NestingOptions) -> Result<PackingOutcome, InputError> {
    options.validate()?;
    let start = Instant::now();

    let interior = sheet.usable_interior();
    let rotations = options.candidate_rotations();
    let instances = placement_order(demands);
    let n_requested = instances.len();
    let n_attempts = usize::min(n_requested, options.max_iterations);

    let state = instances[..n_attempts]
        .iter()
        .fold(ShelfState::default(), |state, dl| {
            state.place(dl, &rotations, options.spacing, &interior)
        });

    let ShelfState {
        placements,
        mut unplaced,
        used_area,
        ..
    } = state;

    if n_attempts < n_requested {
        info!(
            "[SHELF] iteration limit of {} reached, {} units not attempted",
            options.max_iterations,
            n_requested - n_attempts
        );
        unplaced.extend(instances[n_attempts..].iter().map(|dl| dl.id));
    }

    let metrics = LayoutMetrics::from_areas(sheet.area(), used_area);

    debug_assert!({
        let die_lines: HashMap<DieLineId, &Arc<DieLine>> = demands.iter().map(|(dl, _)| (dl.id, dl)).collect();
        let boxes = placements
            .iter()
            .map(|p| (p.id, die_lines[&p.die_line_id].bbox_at(p.rotation, p.position())))
            .collect_vec();
        assertions::boxes_are_feasible(&interior, &boxes, options.spacing, 1e-6)
    });
    debug_assert!(assertions::metrics_are_consistent(&metrics));

    debug!(
        "[SHELF] placed {}/{} units on a {}x{} sheet in {:.3}ms, utilization {:.3}%",
        placements.len(),
        n_requested,
        sheet.width,
        sheet.height,
        start.elapsed().as_secs_f64() * 1000.0,
        metrics.utilization
    );

    Ok(PackingOutcome {
        placements,
        unplaced,
        n_requested,
        metrics,
    })
}
