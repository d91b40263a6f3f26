#![doc = document_features::document_features!()]
//! Nesting engine for die lines: places die-cut shapes onto rectangular stock sheets,
//! searches a size range for the best fitting sheet and guards manual adjustments against collisions.

/// Contracts of the die-line and sheet collaborators, and an in-memory implementation
pub mod catalog;

/// Entry points tying the catalog, configuration and algorithms together
pub mod engine;

/// Entities to model die lines, sheets, options and layouts
pub mod entities;

/// Error types returned by the engine
pub mod error;

/// Geometric primitives and base algorithms
pub mod geometry;

/// Importing requests into and exporting results out of this library
pub mod io;

/// Placement algorithms: shelf packing, sheet-size search and manual adjustment
pub mod packing;

/// Helper functions which do not belong to any specific module
pub mod util;
