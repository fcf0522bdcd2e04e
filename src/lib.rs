//! `picogreen` library crate.
//!
//! The binary (`picogreen`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the assay stages are reusable from other front-ends
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod assay;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
