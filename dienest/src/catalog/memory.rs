use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use crate::catalog::{DieLineLookup, SheetStore};
use crate::entities::{DieLine, DieLineId, Sheet, SheetId, SheetRequest};
use crate::error::{InputError, NestingError};

/// Die lines and sheets kept in memory, safe to share between threads.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    die_lines: RwLock<BTreeMap<DieLineId, Arc<DieLine>>>,
    sheets: RwLock<BTreeMap<SheetId, Sheet>>,
    next_sheet_id: AtomicU64,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `die_line` under its own id, replacing any die line with the same id.
    pub fn insert_die_line(&self, die_line: DieLine) -> Arc<DieLine> {
        let die_line = Arc::new(die_line);
        self.die_lines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(die_line.id, die_line.clone());
        debug!("[CATALOG] stored die line {}", die_line.id);
        die_line
    }

    pub fn remove_die_line(&self, id: DieLineId) -> Option<Arc<DieLine>> {
        self.die_lines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    /// All die lines, ordered by id.
    pub fn die_lines(&self) -> Vec<Arc<DieLine>> {
        self.die_lines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Stores `sheet` under its own id, replacing any sheet with the same id.
    /// Ids handed out by [`SheetStore::insert_sheet`] afterwards are larger than `sheet.id`,
    /// unless it is [`SheetId::UNASSIGNED`].
    pub fn put_sheet(&self, sheet: Sheet) {
        if sheet.id != SheetId::UNASSIGNED {
            self.next_sheet_id
                .fetch_max(sheet.id.0.saturating_add(1), Ordering::SeqCst);
        }
        debug!("[CATALOG] stored sheet {}", sheet.id);
        self.sheets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(sheet.id, sheet);
    }

    pub fn remove_sheet(&self, id: SheetId) -> Option<Sheet> {
        self.sheets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    /// All sheets, ordered by id.
    pub fn sheets(&self) -> Vec<Sheet> {
        self.sheets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}

impl DieLineLookup for InMemoryCatalog {
    fn die_line(&self, id: DieLineId) -> Option<Arc<DieLine>> {
        self.die_lines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}

impl SheetStore for InMemoryCatalog {
    fn sheet(&self, id: SheetId) -> Option<Sheet> {
        self.sheets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn update_sheet(&self, id: SheetId, request: SheetRequest) -> Result<Sheet, NestingError> {
        //validate before taking the lock, the stored sheet is replaced as a whole
        let updated = Sheet::new(id, request)?;
        let mut sheets = self.sheets.write().unwrap_or_else(PoisonError::into_inner);
        match sheets.get_mut(&id) {
            Some(sheet) => {
                *sheet = updated.clone();
                Ok(updated)
            }
            None => Err(NestingError::SheetNotFound(id)),
        }
    }

    fn insert_sheet(&self, request: SheetRequest) -> Result<Sheet, InputError> {
        let id = SheetId(self.next_sheet_id.fetch_add(1, Ordering::SeqCst));
        let sheet = Sheet::new(id, request)?;
        self.sheets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, sheet.clone());
        debug!("[CATALOG] created sheet {}", id);
        Ok(sheet)
    }
}
