//! Reporting: the textual summary printed after a run.

pub mod format;

pub use format::*;
