//! Input/output helpers.
//!
//! - tabular source loading (`source`)
//! - result exports (CSV/JSON) and results JSON reload (`export`)
//! - synthetic plate workbooks (`sample`)

pub mod export;
pub mod sample;
pub mod source;

pub use export::*;
pub use source::*;
