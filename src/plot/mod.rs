//! Chart renderers for the standard curve.
//!
//! - `ascii`: fixed-size terminal plot
//! - `svg`: file output via Plotters

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;
