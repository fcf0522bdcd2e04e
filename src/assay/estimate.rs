//! Back-calculation of the sample concentration from the standard curve.

use crate::domain::{ConcentrationEstimate, LinearFit};
use crate::error::AssayError;

/// Invert the standard curve for each sample reading and average the
/// dilution-scaled results.
///
/// For reading `n`: `x_n = (signal_n - intercept) / slope`, scaled to the
/// undiluted sample as `dilution_n * x_n`. The estimate is the mean of those
/// scaled values.
///
/// Both series are expected to be validated already (see
/// [`validate_pair`](crate::assay::validate_pair)); the shape is re-checked.
pub fn estimate_concentration(
    fit: &LinearFit,
    dilutions: &[f64],
    signals: &[f64],
) -> Result<ConcentrationEstimate, AssayError> {
    if dilutions.is_empty() || signals.is_empty() {
        return Err(AssayError::EmptyInput);
    }
    if dilutions.len() != signals.len() {
        return Err(AssayError::LengthMismatch {
            left: dilutions.len(),
            right: signals.len(),
        });
    }
    if fit.slope == 0.0 {
        return Err(AssayError::DivisionByZero(
            "standard curve slope is zero; it cannot be inverted".to_string(),
        ));
    }

    let back_calculated: Vec<f64> = signals
        .iter()
        .map(|&y| (y - fit.intercept) / fit.slope)
        .collect();
    let contributions: Vec<f64> = dilutions
        .iter()
        .zip(&back_calculated)
        .map(|(&d, &x)| d * x)
        .collect();
    let concentration = contributions.iter().sum::<f64>() / contributions.len() as f64;

    Ok(ConcentrationEstimate {
        dilutions: dilutions.to_vec(),
        signals: signals.to_vec(),
        back_calculated,
        contributions,
        concentration,
    })
}
