use std::time::Instant;

use itertools::Itertools;
use log::{info, warn};

use crate::catalog::{DieLineLookup, SheetStore};
use crate::entities::{Layout, LayoutMetrics, NestingRequest, NestingResult, PlacedDieLine, Sheet, SheetId};
use crate::error::{InputError, NestingError};
use crate::packing::{
    Adjustment, CollisionGuard, Demand, LayoutSession, adjust_placement, pack_sheet, search_sheet_size,
};
use crate::util::{EngineConfig, assertions};

/// Nests die lines onto sheets, resolving both through a catalog.
#[derive(Debug, Clone)]
pub struct NestingEngine<C> {
    catalog: C,
    config: EngineConfig,
}

impl<C: DieLineLookup + SheetStore> NestingEngine<C> {
    pub fn new(catalog: C, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes a layout for the requested die lines.
    ///
    /// If `request.options.sheet_size_range` is set, the sheet is selected by [`search_sheet_size`] and returned
    /// with [`SheetId::UNASSIGNED`], the catalog is left untouched. Callers persist it through
    /// [`SheetStore::insert_sheet`] if needed. Otherwise, the die lines are packed onto the sheet with id `request.sheet_id`.
    /// Units that do not fit a fixed sheet are reported in [`NestingResult::unplaced`].
    pub fn optimize(&self, request: &NestingRequest) -> Result<NestingResult, NestingError> {
        let start = Instant::now();
        let options = &request.options;
        options.validate()?;

        if request.total_quantity() == 0 {
            return Err(NestingError::NoDieLinesToPlace);
        }

        let demands: Vec<Demand> = request
            .die_lines
            .iter()
            .filter(|dlq| dlq.quantity > 0)
            .map(|dlq| {
                self.catalog
                    .die_line(dlq.die_line_id)
                    .map(|dl| (dl, dlq.quantity))
                    .ok_or(NestingError::DieLineNotFound(dlq.die_line_id))
            })
            .collect::<Result<_, _>>()?;

        let (sheet, outcome, is_optimized_size) = match (options.sheet_size_range, request.sheet_id) {
            (Some(_), _) => {
                let search = search_sheet_size(&demands, options, &self.config.size_search)?;
                let sheet = Sheet::new(SheetId::UNASSIGNED, search.sheet)?;
                (sheet, search.packing, true)
            }
            (None, Some(sheet_id)) => {
                let sheet = self
                    .catalog
                    .sheet(sheet_id)
                    .ok_or(NestingError::SheetNotFound(sheet_id))?;
                let outcome = pack_sheet(&sheet, &demands, options)?;
                (sheet, outcome, false)
            }
            (None, None) => return Err(InputError::MissingSheet.into()),
        };

        debug_assert!({
            let layout = Layout::new(sheet.clone(), outcome.placements.clone(), &self.catalog)?;
            assertions::layout_is_feasible(&layout, &self.collision_guard(options.spacing)?)
        });

        if !outcome.unplaced.is_empty() {
            warn!(
                "[ENGINE] {} of {} units did not fit on sheet {}, die lines: {:?}",
                outcome.unplaced.len(),
                outcome.n_requested,
                sheet.id,
                outcome.unplaced.iter().unique().collect_vec()
            );
        }

        info!(
            "[ENGINE] nested {}/{} units on sheet {} ({}x{}) in {:.3}ms, utilization {:.3}%",
            outcome.placements.len(),
            outcome.n_requested,
            sheet.id,
            sheet.width,
            sheet.height,
            start.elapsed().as_secs_f64() * 1000.0,
            outcome.metrics.utilization
        );

        Ok(NestingResult {
            sheet,
            placements: outcome.placements,
            unplaced: outcome.unplaced,
            n_requested: outcome.n_requested,
            metrics: outcome.metrics,
            is_optimized_size,
        })
    }

    /// Validates a manual move of one placement, see [`adjust_placement`].
    /// `placements` is never modified, the updated list is returned instead.
    pub fn manual_adjust(
        &self,
        placements: &[PlacedDieLine],
        adjustment: &Adjustment,
        sheet: &Sheet,
        spacing: f64,
    ) -> Result<Vec<PlacedDieLine>, NestingError> {
        let layout = Layout::new(sheet.clone(), placements.to_vec(), &self.catalog)?;
        let guard = self.collision_guard(spacing)?;
        adjust_placement(&layout, adjustment, &guard)
    }

    /// Opens a working layout on the outcome of a nesting run, for a sequence of manual adjustments.
    pub fn open_session(&self, result: &NestingResult, spacing: f64) -> Result<LayoutSession, NestingError> {
        let layout = Layout::new(result.sheet.clone(), result.placements.clone(), &self.catalog)?;
        let guard = self.collision_guard(spacing)?;
        Ok(LayoutSession::new(layout, guard))
    }

    /// Waste percentage of `placements` on the sheet with id `sheet_id`, 0 for a sheet without area.
    pub fn calculate_waste(&self, sheet_id: SheetId, placements: &[PlacedDieLine]) -> Result<f64, NestingError> {
        let sheet = self
            .catalog
            .sheet(sheet_id)
            .ok_or(NestingError::SheetNotFound(sheet_id))?;
        Ok(self.layout_metrics(&sheet, placements)?.waste)
    }

    pub fn layout_metrics(&self, sheet: &Sheet, placements: &[PlacedDieLine]) -> Result<LayoutMetrics, NestingError> {
        LayoutMetrics::compute(sheet, placements, &self.catalog)
    }

    fn collision_guard(&self, spacing: f64) -> Result<CollisionGuard, InputError> {
        CollisionGuard::new(spacing, self.config.epsilon, self.config.overlap_mode)
    }
}
