//! Synthetic plate-reader workbooks.
//!
//! Readings follow a known standard curve `blank + slope * concentration`
//! with multiplicative Gaussian noise, so the pipeline's answer can be checked
//! against the concentration the plate was built from.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{
    Cell, DEFAULT_BLANK_LABEL, DEFAULT_DILUTIONS_LABEL, DEFAULT_PRIMARY_SHEET, DEFAULT_SAMPLE_SIGNAL_LABEL,
    DEFAULT_STANDARD_CONCENTRATION_LABEL, DEFAULT_STANDARD_SIGNAL_LABEL,
};
use crate::error::AssayError;
use crate::io::source::{Sheet, Workbook};

/// Standard concentrations [pg/µl] of a typical Picogreen dilution series.
pub const STANDARDS: [f64; 6] = [0.0, 25.0, 50.0, 100.0, 250.0, 500.0];

/// Dilution factors of the sample readings.
pub const DILUTIONS: [f64; 3] = [50.0, 100.0, 200.0];

/// Parameters of a synthetic plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePlate {
    /// Fluorescence per pg/µl.
    pub slope: f64,
    /// Blank fluorescence.
    pub blank: f64,
    /// True concentration of the undiluted sample [pg/µl].
    pub concentration: f64,
    /// Relative noise on every reading.
    pub noise: f64,
}

impl Default for SamplePlate {
    fn default() -> Self {
        Self {
            slope: 12.5,
            blank: 180.0,
            concentration: 8000.0,
            noise: 0.02,
        }
    }
}

/// Build a two-sheet workbook: `Input` with the five template rows, then `Notes`.
///
/// Measurement cells are floats; the sample row also carries an integer
/// replicate count that the float-only filter drops.
pub fn synthetic_plate(plate: &SamplePlate, seed: u64) -> Result<Workbook, AssayError> {
    let normal = Normal::new(0.0, plate.noise.abs()).map_err(|e| {
        AssayError::InvalidArgument(format!("Invalid noise level {}: {e}", plate.noise))
    })?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut reading = |true_signal: f64| true_signal * (1.0 + normal.sample(&mut rng));

    let blank = reading(plate.blank);
    let standards: Vec<f64> = STANDARDS
        .iter()
        .map(|c| reading(plate.blank + plate.slope * c))
        .collect();
    let samples: Vec<f64> = DILUTIONS
        .iter()
        .map(|d| reading(plate.blank + plate.slope * plate.concentration / d))
        .collect();

    let mut sample_row = row(DEFAULT_SAMPLE_SIGNAL_LABEL, &samples);
    sample_row.push(Cell::Int(3));

    let input = Sheet::new(
        Some(DEFAULT_PRIMARY_SHEET),
        vec![
            vec![
                Cell::Text("Picogreen assay".to_string()),
                Cell::Empty,
                Cell::Text("replicates".to_string()),
            ],
            row(DEFAULT_BLANK_LABEL, &[blank]),
            row(DEFAULT_STANDARD_CONCENTRATION_LABEL, &STANDARDS),
            row(DEFAULT_STANDARD_SIGNAL_LABEL, &standards),
            row(DEFAULT_DILUTIONS_LABEL, &DILUTIONS),
            sample_row,
        ],
    );

    // Seeds past i64::MAX have no integer cell; keep them verbatim as text.
    let seed_cell = i64::try_from(seed)
        .map(Cell::Int)
        .unwrap_or_else(|_| Cell::Text(seed.to_string()));
    let notes = Sheet::new(
        Some("Notes"),
        vec![
            vec![Cell::Text("seed".to_string()), seed_cell],
            vec![
                Cell::Text("true concentration".to_string()),
                Cell::Float(plate.concentration),
            ],
        ],
    );

    Ok(Workbook::new(vec![input, notes]))
}

fn row(label: &str, values: &[f64]) -> Vec<Cell> {
    let mut cells = vec![Cell::Text(label.to_string())];
    cells.extend(values.iter().map(|&v| Cell::Float(v)));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_the_same_plate() {
        let plate = SamplePlate::default();
        assert_eq!(synthetic_plate(&plate, 7).unwrap(), synthetic_plate(&plate, 7).unwrap());
        assert_ne!(synthetic_plate(&plate, 7).unwrap(), synthetic_plate(&plate, 8).unwrap());
    }

    #[test]
    fn primary_sheet_comes_first() {
        let wb = synthetic_plate(&SamplePlate::default(), 1).unwrap();
        assert_eq!(wb.sheet_names(), vec![Some("Input"), Some("Notes")]);
        assert_eq!(wb.sheets[0].n_rows(), 6);
    }

    #[test]
    fn large_seeds_are_kept_as_text() {
        let wb = synthetic_plate(&SamplePlate::default(), u64::MAX).unwrap();
        assert_eq!(wb.sheets[1].cell(0, 1), &Cell::Text(u64::MAX.to_string()));

        let wb = synthetic_plate(&SamplePlate::default(), 42).unwrap();
        assert_eq!(wb.sheets[1].cell(0, 1), &Cell::Int(42));
    }

    #[test]
    fn noiseless_plate_lies_on_the_curve() {
        let plate = SamplePlate {
            noise: 0.0,
            ..SamplePlate::default()
        };
        let wb = synthetic_plate(&plate, 1).unwrap();
        assert_eq!(wb.sheets[0].cell(1, 1), &Cell::Float(180.0));
        assert_eq!(wb.sheets[0].cell(3, 2), &Cell::Float(180.0 + 12.5 * 25.0));
    }
}
