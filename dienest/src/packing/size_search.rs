use std::time::Instant;

use itertools::Itertools;
use log::{debug, info};
use ordered_float::OrderedFloat;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::entities::{Margins, NestingOptions, Sheet, SheetId, SheetRequest, SheetSizeRange};
use crate::error::{InputError, NestingError};
use crate::packing::{Demand, PackingOutcome, pack_sheet};
use crate::util::SizeSearchConfig;

/// Best candidate found by [`search_sheet_size`].
#[derive(Clone, Debug, PartialEq)]
pub struct SizeSearchOutcome {
    /// The selected sheet, not yet stored in any catalog
    pub sheet: SheetRequest,
    pub packing: PackingOutcome,
    /// Number of candidate sheets that were evaluated
    pub n_candidates: usize,
}

/// Values from `min` to `max` (both inclusive) in `n_steps` equal steps.
/// A single value if the axis is degenerate.
fn axis_values(min: f64, max: f64, n_steps: usize) -> Vec<f64> {
    if n_steps == 0 || min >= max {
        return vec![min];
    }
    (0..=n_steps)
        .map(|i| match i == n_steps {
            true => max,
            false => min + (max - min) * i as f64 / n_steps as f64,
        })
        .collect_vec()
}

/// Candidate sheet dimensions between the lower bounds `(min_w, min_h)` and the maxima of `range`:
/// a grid of `n_steps` equal steps per axis plus the four corners, without duplicates,
/// sorted by area, then width, then height (all ascending).
pub fn candidate_sizes(range: &SheetSizeRange, min_w: f64, min_h: f64, n_steps: usize) -> Vec<(f64, f64)> {
    let widths = axis_values(min_w, range.max_width, n_steps);
    let heights = axis_values(min_h, range.max_height, n_steps);
    let corners = [
        (min_w, min_h),
        (min_w, range.max_height),
        (range.max_width, min_h),
        (range.max_width, range.max_height),
    ];

    widths
        .iter()
        .cartesian_product(heights.iter())
        .map(|(&w, &h)| (w, h))
        .chain(corners)
        .map(|(w, h)| (OrderedFloat(w), OrderedFloat(h)))
        .sorted_by_key(|&(w, h)| (w * h, w, h))
        .dedup()
        .map(|(w, h)| (w.0, h.0))
        .collect_vec()
}

/// Searches `options.sheet_size_range` for the sheet on which the shelf packer places every demanded unit
/// with the highest utilization. Among equally good candidates, the smallest (first in
/// [`candidate_sizes`] order) wins.
///
/// This is a grid search, it does not guarantee the optimal sheet size.
pub fn search_sheet_size(
    demands: &[Demand],
    options: &NestingOptions,
    config: &SizeSearchConfig,
) -> Result<SizeSearchOutcome, NestingError> {
    options.validate()?;
    let range = options.sheet_size_range.ok_or(InputError::MissingSheet)?;
    let start = Instant::now();

    let demanded = demands.iter().filter(|(_, qty)| *qty > 0).collect_vec();
    if demanded.is_empty() {
        return Err(NestingError::NoDieLinesToPlace);
    }

    let margin = config.sheet_margin;
    let required_width = demanded.iter().map(|(dl, _)| dl.width).fold(0.0, f64::max) + 2.0 * margin;
    let required_height = demanded.iter().map(|(dl, _)| dl.height).fold(0.0, f64::max) + 2.0 * margin;
    let min_w = f64::max(range.min_width, required_width);
    let min_h = f64::max(range.min_height, required_height);
    if min_w > range.max_width || min_h > range.max_height {
        return Err(NestingError::SizeRangeInfeasible {
            range,
            required_width,
            required_height,
        });
    }

    let candidates = candidate_sizes(&range, min_w, min_h, config.n_steps);
    debug!(
        "[SEARCH] evaluating {} candidate sheets in range {}",
        candidates.len(),
        range
    );

    let evaluate = |&(width, height): &(f64, f64)| -> Result<(SheetRequest, PackingOutcome), InputError> {
        let request = SheetRequest {
            name: "Optimized Sheet".to_string(),
            width,
            height,
            margins: Margins::uniform(margin),
            material: "Auto".to_string(),
        };
        let sheet = Sheet::new(SheetId::UNASSIGNED, request.clone())?;
        let outcome = pack_sheet(&sheet, demands, options)?;
        debug!(
            "[SEARCH] candidate {}x{}: {}/{} placed, utilization {:.3}%",
            width,
            height,
            outcome.placements.len(),
            outcome.n_requested,
            outcome.metrics.utilization
        );
        Ok((request, outcome))
    };

    #[cfg(feature = "parallel")]
    let evaluated = candidates.par_iter().map(evaluate).collect::<Result<Vec<_>, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let evaluated = candidates.iter().map(evaluate).collect::<Result<Vec<_>, _>>()?;

    //evaluated is in candidate order, so strict improvement keeps the earliest among ties
    let best = evaluated
        .into_iter()
        .filter(|(_, outcome)| outcome.is_complete())
        .fold(None::<(SheetRequest, PackingOutcome)>, |best, candidate| match best {
            Some(b) if b.1.metrics.utilization >= candidate.1.metrics.utilization => Some(b),
            _ => Some(candidate),
        });

    match best {
        Some((sheet, packing)) => {
            info!(
                "[SEARCH] selected {}x{} sheet out of {} candidates in {:.3}ms, utilization {:.3}%",
                sheet.width,
                sheet.height,
                candidates.len(),
                start.elapsed().as_secs_f64() * 1000.0,
                packing.metrics.utilization
            );
            Ok(SizeSearchOutcome {
                sheet,
                packing,
                n_candidates: candidates.len(),
            })
        }
        None => {
            info!("[SEARCH] no candidate in range {range} holds all die lines");
            Err(NestingError::SizeRangeExhausted(range))
        }
    }
}
