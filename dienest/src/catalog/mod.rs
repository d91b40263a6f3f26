//! The engine does not own die-line or sheet records. It reaches them through the
//! [`DieLineLookup`] and [`SheetStore`] contracts, which a persistence layer implements.
//! [`InMemoryCatalog`] is a thread-safe implementation of both.

mod memory;

use std::sync::Arc;

#[doc(inline)]
pub use memory::InMemoryCatalog;

use crate::entities::{DieLine, DieLineId, Sheet, SheetId, SheetRequest};
use crate::error::{InputError, NestingError};

/// Read access to die lines by id.
pub trait DieLineLookup {
    fn die_line(&self, id: DieLineId) -> Option<Arc<DieLine>>;
}

/// Read and update access to sheets by id.
pub trait SheetStore {
    fn sheet(&self, id: SheetId) -> Option<Sheet>;

    /// Replaces all fields of the sheet atomically.
    fn update_sheet(&self, id: SheetId, request: SheetRequest) -> Result<Sheet, NestingError>;

    /// Stores a new sheet under a freshly assigned id.
    fn insert_sheet(&self, request: SheetRequest) -> Result<Sheet, InputError>;
}

impl<T: DieLineLookup + ?Sized> DieLineLookup for &T {
    fn die_line(&self, id: DieLineId) -> Option<Arc<DieLine>> {
        (**self).die_line(id)
    }
}

impl<T: DieLineLookup + ?Sized> DieLineLookup for Arc<T> {
    fn die_line(&self, id: DieLineId) -> Option<Arc<DieLine>> {
        (**self).die_line(id)
    }
}

impl<T: SheetStore + ?Sized> SheetStore for &T {
    fn sheet(&self, id: SheetId) -> Option<Sheet> {
        (**self).sheet(id)
    }

    fn update_sheet(&self, id: SheetId, request: SheetRequest) -> Result<Sheet, NestingError> {
        (**self).update_sheet(id, request)
    }

    fn insert_sheet(&self, request: SheetRequest) -> Result<Sheet, InputError> {
        (**self).insert_sheet(request)
    }
}

impl<T: SheetStore + ?Sized> SheetStore for Arc<T> {
    fn sheet(&self, id: SheetId) -> Option<Sheet> {
        (**self).sheet(id)
    }

    fn update_sheet(&self, id: SheetId, request: SheetRequest) -> Result<Sheet, NestingError> {
        (**self).update_sheet(id, request)
    }

    fn insert_sheet(&self, request: SheetRequest) -> Result<Sheet, InputError> {
        (**self).insert_sheet(request)
    }
}
