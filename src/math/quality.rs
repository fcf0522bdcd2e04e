//! Goodness of fit for the standard curve.

use nalgebra::DVector;

use crate::assay::validate::validate_pair;
use crate::error::AssayError;

/// Squared Pearson correlation between standard concentrations and their
/// fluorescence (R²).
///
/// # Errors
/// - anything [`validate_pair`] rejects
/// - `DivisionByZero` if either series has zero variance (correlation undefined)
pub fn r_squared(x: &[f64], y: &[f64]) -> Result<f64, AssayError> {
    let r = pearson_r(x, y)?;
    Ok(r * r)
}

/// Pearson correlation coefficient.
pub fn pearson_r(x: &[f64], y: &[f64]) -> Result<f64, AssayError> {
    let (x, y) = validate_pair(x, y)?;
    let x = DVector::from_vec(x);
    let y = DVector::from_vec(y);

    let x_centered = x.add_scalar(-x.mean());
    let y_centered = y.add_scalar(-y.mean());

    let sxx = x_centered.norm_squared();
    let syy = y_centered.norm_squared();
    if sxx == 0.0 || syy == 0.0 {
        return Err(AssayError::DivisionByZero(
            "correlation is undefined for a series with zero variance".to_string(),
        ));
    }

    // Rounding can push |r| a hair past 1 for perfectly linear data.
    let r = x_centered.dot(&y_centered) / (sxx * syy).sqrt();
    Ok(r.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_line_has_unit_r_squared() {
        let r2 = r_squared(&[0.0, 10.0, 20.0, 30.0], &[5.0, 15.0, 25.0, 35.0]).unwrap();
        assert!((r2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn anticorrelated_series_has_negative_r() {
        let r = pearson_r(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
        assert!((r_squared(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn known_correlation() {
        // x = [1,2,3,4], y = [2,1,4,3]: r = 0.6
        let r2 = r_squared(&[1.0, 2.0, 3.0, 4.0], &[2.0, 1.0, 4.0, 3.0]).unwrap();
        assert!((r2 - 0.36).abs() < 1e-12);
    }

    #[test]
    fn zero_variance_is_undefined() {
        let err = r_squared(&[1.0, 1.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, AssayError::DivisionByZero(_)));
        let err = r_squared(&[1.0, 2.0], &[4.0, 4.0]).unwrap_err();
        assert!(matches!(err, AssayError::DivisionByZero(_)));
    }

    #[test]
    fn unequal_lengths_are_rejected() {
        let err = r_squared(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, AssayError::LengthMismatch { left: 3, right: 2 });
    }
}
