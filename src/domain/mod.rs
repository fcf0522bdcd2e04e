//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - source cells and row labels (`Cell`, `Label`)
//! - the per-run series accumulator (`Dataset`)
//! - fit and estimate outputs (`LinearFit`, `ConcentrationEstimate`, `StandardCurveChart`)
//! - run configuration (`AssayConfig`, `RowLabels`, `BlankMode`, `NumericCells`)

pub mod types;

pub use types::*;
