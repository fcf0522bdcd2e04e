//! Assay stages: row extraction, blank correction, series validation and
//! back-calculation of the sample concentration.

pub mod blank;
pub mod estimate;
pub mod extract;
pub mod validate;

pub use blank::*;
pub use estimate::*;
pub use extract::*;
pub use validate::*;
