//! Pairwise series validation.
//!
//! Two series that are meant to be read as `(x, y)` pairs are checked for
//! shape (both non-empty, equal length) and every element is coerced to `f64`.
//! Order and length are kept; nothing else is transformed.

use crate::domain::Cell;
use crate::error::AssayError;

/// A value that may be read as a number.
///
/// Text is trimmed and parsed; booleans read as `1.0`/`0.0`; empty cells are
/// not numbers.
pub trait NumericLike {
    fn to_number(&self) -> Option<f64>;

    /// Rendering used in error messages.
    fn describe(&self) -> String;
}

impl NumericLike for f64 {
    fn to_number(&self) -> Option<f64> {
        Some(*self)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl NumericLike for i64 {
    fn to_number(&self) -> Option<f64> {
        Some(*self as f64)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl NumericLike for str {
    fn to_number(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok()
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl NumericLike for String {
    fn to_number(&self) -> Option<f64> {
        self.as_str().to_number()
    }

    fn describe(&self) -> String {
        self.clone()
    }
}

impl NumericLike for Cell {
    fn to_number(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Int(i) => Some(*i as f64),
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Cell::Text(s) => s.to_number(),
            Cell::Empty => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            Cell::Empty => "<empty>".to_string(),
            other => other.to_string(),
        }
    }
}

impl<T: NumericLike + ?Sized> NumericLike for &T {
    fn to_number(&self) -> Option<f64> {
        (**self).to_number()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Validate two series as `(x, y)` pairs and coerce them to `f64`.
///
/// # Errors
/// - `EmptyInput` if either series has no elements
/// - `LengthMismatch` if their lengths differ
/// - `NonNumericValue` naming the first element that is not a number
pub fn validate_pair<A, B>(a: &[A], b: &[B]) -> Result<(Vec<f64>, Vec<f64>), AssayError>
where
    A: NumericLike,
    B: NumericLike,
{
    if a.is_empty() || b.is_empty() {
        return Err(AssayError::EmptyInput);
    }
    if a.len() != b.len() {
        return Err(AssayError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    Ok((coerce(a)?, coerce(b)?))
}

fn coerce<T: NumericLike>(values: &[T]) -> Result<Vec<f64>, AssayError> {
    values
        .iter()
        .map(|v| {
            v.to_number()
                .ok_or_else(|| AssayError::NonNumericValue(v.describe()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_floats_coerce_to_the_same_series() {
        let (a, b) = validate_pair(&["1", "2", "3"], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(a, vec![1.0, 2.0, 3.0]);
        assert_eq!(b, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = validate_pair(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(err, AssayError::LengthMismatch { left: 2, right: 1 });
    }

    #[test]
    fn text_that_is_not_a_number_is_rejected() {
        let err = validate_pair(&["a"], &[1.0]).unwrap_err();
        assert_eq!(err, AssayError::NonNumericValue("a".to_string()));
    }

    #[test]
    fn empty_series_are_rejected() {
        let empty: [f64; 0] = [];
        assert_eq!(validate_pair(&empty, &[1.0]).unwrap_err(), AssayError::EmptyInput);
        assert_eq!(validate_pair(&[1.0], &empty).unwrap_err(), AssayError::EmptyInput);
    }

    #[test]
    fn cells_coerce_like_numbers() {
        let cells = vec![Cell::Int(2), Cell::Text(" 2.5 ".to_string()), Cell::Bool(true)];
        let (a, _) = validate_pair(&cells, &[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(a, vec![2.0, 2.5, 1.0]);

        let err = validate_pair(&[Cell::Empty], &[1i64]).unwrap_err();
        assert_eq!(err, AssayError::NonNumericValue("<empty>".to_string()));
    }
}
