//! Ordinary least squares for a straight line.
//!
//! The standard curve is `y = a0 + a1 * x`. With the data centered on its means
//! the normal equations reduce to:
//!
//! ```text
//! x*_i = x_i - mean(x)
//! y*_i = y_i - mean(y)
//! a1   = Σ(x*_i · y*_i) / Σ(x*_i²)
//! a0   = mean(y) - a1 · mean(x)
//! ```
//!
//! Everything stays in `f64`; rounding is left to presentation.

use nalgebra::DVector;

use crate::assay::validate::{NumericLike, validate_pair};
use crate::domain::LinearFit;
use crate::error::AssayError;

/// Fit a line through paired `(x, y)` points.
///
/// # Errors
/// - anything [`validate_pair`] rejects (empty, unequal length, non-numeric)
/// - `DivisionByZero` if all `x` values are identical (zero variance)
pub fn fit_line<A, B>(x: &[A], y: &[B]) -> Result<LinearFit, AssayError>
where
    A: NumericLike,
    B: NumericLike,
{
    let (x, y) = validate_pair(x, y)?;

    if x.iter().all(|&v| v == x[0]) {
        return Err(AssayError::DivisionByZero(format!(
            "all {} x values equal {}; the slope is undefined",
            x.len(),
            x[0]
        )));
    }

    let x = DVector::from_vec(x);
    let y = DVector::from_vec(y);

    let x_mean = x.mean();
    let y_mean = y.mean();
    let x_centered = x.add_scalar(-x_mean);
    let y_centered = y.add_scalar(-y_mean);

    let sxx = x_centered.norm_squared();
    if sxx == 0.0 {
        return Err(AssayError::DivisionByZero(
            "x values have zero variance; the slope is undefined".to_string(),
        ));
    }

    let slope = x_centered.dot(&y_centered) / sxx;
    let intercept = y_mean - slope * x_mean;

    log::info!("Fitted standard curve: slope={slope}, intercept={intercept}");
    Ok(LinearFit { slope, intercept })
}
