use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::entities::{Layout, LayoutMetrics, PlacedDieLine};
use crate::error::NestingError;
use crate::packing::{Adjustment, CollisionGuard, adjust_placement};

/// A working layout that accepts manual adjustments one at a time.
///
/// Adjustments are validated and applied under exclusive access,
/// a rejected adjustment leaves the layout as it was.
#[derive(Debug)]
pub struct LayoutSession {
    layout: Mutex<Layout>,
    guard: CollisionGuard,
}

impl LayoutSession {
    pub fn new(layout: Layout, guard: CollisionGuard) -> Self {
        Self {
            layout: Mutex::new(layout),
            guard,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Layout> {
        //the layout is only replaced after a successful validation, a poisoned lock still holds a valid layout
        self.layout.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `adjustment` and returns the resulting placements.
    pub fn adjust(&self, adjustment: &Adjustment) -> Result<Vec<PlacedDieLine>, NestingError> {
        let mut layout = self.lock();
        let updated = adjust_placement(&layout, adjustment, &self.guard)?;
        layout.replace_placements(updated.clone());
        Ok(updated)
    }

    pub fn placements(&self) -> Vec<PlacedDieLine> {
        self.lock().placements().to_vec()
    }

    pub fn metrics(&self) -> LayoutMetrics {
        self.lock().metrics()
    }

    /// A copy of the current layout.
    pub fn snapshot(&self) -> Layout {
        self.lock().clone()
    }

    pub fn guard(&self) -> &CollisionGuard {
        &self.guard
    }

    pub fn into_layout(self) -> Layout {
        self.layout.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
