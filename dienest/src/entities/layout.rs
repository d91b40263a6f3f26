use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::DieLineLookup;
use crate::entities::{DieLine, DieLineId, LayoutMetrics, PlacedDieLine, PlacementId, Sheet};
use crate::error::NestingError;
use crate::geometry::PlacedShape;

/// A sheet together with the die lines placed on it, with every referenced [`DieLine`] resolved.
#[derive(Clone, Debug)]
pub struct Layout {
    pub sheet: Sheet,
    placements: Vec<PlacedDieLine>,
    die_lines: BTreeMap<DieLineId, Arc<DieLine>>,
}

impl Layout {
    pub fn new(
        sheet: Sheet,
        placements: Vec<PlacedDieLine>,
        lookup: &impl DieLineLookup,
    ) -> Result<Self, NestingError> {
        let mut die_lines = BTreeMap::new();
        for p in &placements {
            if !die_lines.contains_key(&p.die_line_id) {
                let die_line = lookup
                    .die_line(p.die_line_id)
                    .ok_or(NestingError::DieLineNotFound(p.die_line_id))?;
                die_lines.insert(p.die_line_id, die_line);
            }
        }
        Ok(Layout {
            sheet,
            placements,
            die_lines,
        })
    }

    pub fn placements(&self) -> &[PlacedDieLine] {
        &self.placements
    }

    pub fn placement(&self, id: PlacementId) -> Option<&PlacedDieLine> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// Every die line referenced by the placements, ordered by id.
    pub fn die_lines(&self) -> impl Iterator<Item = &Arc<DieLine>> {
        self.die_lines.values()
    }

    /// Shape of `placement` as it lies on the sheet.
    /// Returns `None` if its die line is not part of this layout.
    pub fn placed_shape(&self, placement: &PlacedDieLine) -> Option<PlacedShape> {
        self.die_lines
            .get(&placement.die_line_id)
            .map(|dl| dl.placed_shape(placement.rotation, placement.position()))
    }

    /// Replaces all placements. Every die line they reference must already be part of the layout.
    pub(crate) fn replace_placements(&mut self, placements: Vec<PlacedDieLine>) {
        debug_assert!(placements.iter().all(|p| self.die_lines.contains_key(&p.die_line_id)));
        self.placements = placements;
    }

    pub fn metrics(&self) -> LayoutMetrics {
        let used_area = self
            .placements
            .iter()
            .filter_map(|p| self.die_lines.get(&p.die_line_id).map(|dl| dl.nominal_area() * p.quantity as f64))
            .sum();
        LayoutMetrics::from_areas(self.sheet.area(), used_area)
    }
}

impl DieLineLookup for Layout {
    fn die_line(&self, id: DieLineId) -> Option<Arc<DieLine>> {
        self.die_lines.get(&id).cloned()
    }
}
