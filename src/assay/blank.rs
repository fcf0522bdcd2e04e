//! Blank subtraction.
//!
//! The carrier fluoresces too, so every signal series is corrected by the blank
//! series before fitting.

use crate::domain::{BlankMode, Dataset, Label};
use crate::error::AssayError;

/// Replace the series under `target` with its blank-corrected version.
///
/// `BlankMode::CrossProduct` subtracts every blank value from every target
/// value, outer loop over the target and inner loop over the blank:
/// `[10, 20] - [1, 2]` gives `[9, 8, 19, 18]`.
/// `BlankMode::Mean` subtracts the blank mean from each target value.
///
/// # Errors
/// - `KeyNotFound` if `target` or `blank` is absent from `dataset`
/// - `EmptyValue` if either series is empty
pub fn subtract_blank(
    mut dataset: Dataset,
    target: &Label,
    blank: &Label,
    mode: BlankMode,
) -> Result<Dataset, AssayError> {
    let values = dataset
        .get(target)
        .ok_or_else(|| AssayError::KeyNotFound(target.to_string()))?;
    if values.is_empty() {
        return Err(AssayError::EmptyValue(target.to_string()));
    }

    let blank_values = dataset
        .get(blank)
        .ok_or_else(|| AssayError::KeyNotFound(blank.to_string()))?;
    if blank_values.is_empty() {
        return Err(AssayError::EmptyValue(blank.to_string()));
    }

    let corrected: Vec<f64> = match mode {
        BlankMode::CrossProduct => {
            if blank_values.len() > 1 {
                log::warn!(
                    "Blank '{blank}' has {} values; '{target}' grows from {} to {} values",
                    blank_values.len(),
                    values.len(),
                    values.len() * blank_values.len()
                );
            }
            values
                .iter()
                .flat_map(|&i| blank_values.iter().map(move |&j| i - j))
                .collect()
        }
        BlankMode::Mean => {
            let mean = blank_values.iter().sum::<f64>() / blank_values.len() as f64;
            values.iter().map(|&i| i - mean).collect()
        }
    };

    dataset.insert(target.clone(), corrected);
    Ok(dataset)
}
