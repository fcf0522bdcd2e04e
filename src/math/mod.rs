//! Mathematical utilities: straight-line least squares and fit quality.

pub mod ols;
pub mod quality;

pub use ols::*;
pub use quality::*;
