//! Row extraction.
//!
//! The plate-reader template is loosely structured: a label in one column names
//! the row, and the measurements sit somewhere to its right, possibly mixed
//! with notes and empty cells. Extraction locates the row by its label and keeps
//! its numeric cells.
//!
//! Strict about the row itself:
//! - the primary sheet must come first
//! - the label must appear exactly once in the label column
//! - at least one measurement must remain after filtering

use crate::domain::{Cell, Dataset, Label, NumericCells};
use crate::error::AssayError;
use crate::io::source::{Sheet, Workbook};

/// Convert a configured (signed) column index to a usable one.
pub fn column_index(column: i64) -> Result<usize, AssayError> {
    usize::try_from(column).map_err(|_| {
        AssayError::InvalidArgument(format!(
            "Column index must be zero or positive, got {column}"
        ))
    })
}

/// Pulls labeled rows out of the primary sheet of a workbook.
#[derive(Debug, Clone)]
pub struct RowExtractor {
    workbook: Workbook,
    primary_sheet: String,
    numeric_cells: NumericCells,
}

impl RowExtractor {
    pub fn new(workbook: Workbook, primary_sheet: impl Into<String>) -> Self {
        Self {
            workbook,
            primary_sheet: primary_sheet.into(),
            numeric_cells: NumericCells::default(),
        }
    }

    pub fn with_numeric_cells(mut self, numeric_cells: NumericCells) -> Self {
        self.numeric_cells = numeric_cells;
        self
    }

    /// Find the row labeled `label` in `column`, and store its measurements in
    /// `dataset` under that label (overwriting any earlier entry).
    ///
    /// Reading is side-effect free on the source: extracting the same label
    /// twice yields the same series.
    pub fn extract(
        &self,
        label: &Label,
        column: usize,
        mut dataset: Dataset,
    ) -> Result<Dataset, AssayError> {
        if let Label::Number(n) = label {
            if !n.is_finite() {
                return Err(AssayError::InvalidArgument(format!(
                    "Row label must be a finite number or text, got {n}"
                )));
            }
        }

        let sheet = self.primary()?;

        let matches: Vec<usize> = (0..sheet.n_rows())
            .filter(|&row| label.matches(sheet.cell(row, column)))
            .collect();

        let row = match matches.as_slice() {
            [] => {
                return Err(AssayError::LabelNotFound {
                    label: label.to_string(),
                    column,
                });
            }
            [row] => *row,
            many => {
                return Err(AssayError::DuplicateLabel {
                    label: label.to_string(),
                    column,
                    count: many.len(),
                });
            }
        };

        let values = numeric_values(sheet.row(row), self.numeric_cells);
        if values.is_empty() {
            return Err(AssayError::EmptyRow(label.to_string()));
        }

        log::debug!("Row '{label}' (sheet row {}): {values:?}", row + 1);
        dataset.insert(label.clone(), values);
        Ok(dataset)
    }

    fn primary(&self) -> Result<&Sheet, AssayError> {
        let names = self.workbook.sheet_names();
        let Some(first) = names.first() else {
            return Err(AssayError::SchemaViolation(
                "Source contains no sheets.".to_string(),
            ));
        };

        // An unnamed sheet (CSV) is the primary sheet by construction.
        if let Some(name) = first {
            if *name != self.primary_sheet {
                return Err(AssayError::SchemaViolation(format!(
                    "'{}' sheet has to be at the first position (found '{name}').",
                    self.primary_sheet
                )));
            }
        }

        self.workbook
            .sheet_by_index(0)
            .ok_or_else(|| AssayError::SchemaViolation("Sheet not found.".to_string()))
    }
}

/// Keep the measurement cells of a row according to `policy`.
fn numeric_values(row: &[Cell], policy: NumericCells) -> Vec<f64> {
    let mut dropped_ints = 0usize;
    let values: Vec<f64> = row
        .iter()
        .filter_map(|cell| match (cell, policy) {
            (Cell::Float(v), _) => Some(*v),
            (Cell::Int(i), NumericCells::AnyNumeric) => Some(*i as f64),
            (Cell::Int(_), NumericCells::FloatOnly) => {
                dropped_ints += 1;
                None
            }
            _ => None,
        })
        .collect();

    if dropped_ints > 0 {
        log::warn!(
            "Dropped {dropped_ints} integer cell(s); only floating-point cells count as measurements"
        );
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn plate() -> Workbook {
        Workbook::new(vec![
            Sheet::new(
                Some("Input"),
                vec![
                    vec![text("Picogreen plate"), Cell::Empty],
                    vec![text("Mean Blank"), Cell::Float(1.5), text("a.u."), Cell::Float(2.5)],
                    vec![text("Mean Sample"), Cell::Int(7), Cell::Float(20.0), Cell::Bool(true)],
                    vec![text("Empty row"), Cell::Empty, text("n/a")],
                    vec![text("Twice"), Cell::Float(1.0)],
                    vec![text("Twice"), Cell::Float(2.0)],
                    vec![Cell::Empty, text("Mean Blank"), Cell::Float(9.0)],
                ],
            ),
            Sheet::new(Some("Notes"), vec![vec![text("Mean Blank"), Cell::Float(0.0)]]),
        ])
    }

    #[test]
    fn extracts_float_cells_of_the_labeled_row() {
        let ex = RowExtractor::new(plate(), "Input");
        let data = ex.extract(&"Mean Blank".into(), 0, Dataset::new()).unwrap();
        assert_eq!(data.get(&"Mean Blank".into()), Some(&[1.5, 2.5][..]));
    }

    #[test]
    fn integer_cells_are_dropped_unless_opted_in() {
        let label: Label = "Mean Sample".into();

        let ex = RowExtractor::new(plate(), "Input");
        let data = ex.extract(&label, 0, Dataset::new()).unwrap();
        assert_eq!(data.get(&label), Some(&[20.0][..]));

        let ex = ex.with_numeric_cells(NumericCells::AnyNumeric);
        let data = ex.extract(&label, 0, Dataset::new()).unwrap();
        assert_eq!(data.get(&label), Some(&[7.0, 20.0][..]));
    }

    #[test]
    fn extraction_is_idempotent() {
        let ex = RowExtractor::new(plate(), "Input");
        let label: Label = "Mean Blank".into();
        let once = ex.extract(&label, 0, Dataset::new()).unwrap();
        let twice = ex.extract(&label, 0, once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn label_column_is_configurable() {
        let ex = RowExtractor::new(plate(), "Input");
        let data = ex.extract(&"Mean Blank".into(), 1, Dataset::new()).unwrap();
        assert_eq!(data.get(&"Mean Blank".into()), Some(&[9.0][..]));
    }

    #[test]
    fn missing_and_duplicate_labels_are_rejected() {
        let ex = RowExtractor::new(plate(), "Input");

        let err = ex.extract(&"Mean Standard".into(), 0, Dataset::new()).unwrap_err();
        assert!(matches!(err, AssayError::LabelNotFound { column: 0, .. }));

        let err = ex.extract(&"Twice".into(), 0, Dataset::new()).unwrap_err();
        assert!(matches!(err, AssayError::DuplicateLabel { count: 2, .. }));
    }

    #[test]
    fn row_without_numbers_is_empty() {
        let ex = RowExtractor::new(plate(), "Input");
        let err = ex.extract(&"Empty row".into(), 0, Dataset::new()).unwrap_err();
        assert_eq!(err, AssayError::EmptyRow("Empty row".to_string()));
    }

    #[test]
    fn primary_sheet_must_come_first() {
        let mut wb = plate();
        wb.sheets.reverse();
        let ex = RowExtractor::new(wb, "Input");
        let err = ex.extract(&"Mean Blank".into(), 0, Dataset::new()).unwrap_err();
        assert!(matches!(err, AssayError::SchemaViolation(_)));

        let ex = RowExtractor::new(Workbook::default(), "Input");
        let err = ex.extract(&"Mean Blank".into(), 0, Dataset::new()).unwrap_err();
        assert!(matches!(err, AssayError::SchemaViolation(_)));
    }

    #[test]
    fn unnamed_sheet_is_accepted_as_primary() {
        let wb = Workbook::new(vec![Sheet::new(
            None,
            vec![vec![text("Mean Blank"), Cell::Float(3.0)]],
        )]);
        let ex = RowExtractor::new(wb, "Input");
        assert!(ex.extract(&"Mean Blank".into(), 0, Dataset::new()).is_ok());
    }

    #[test]
    fn negative_column_is_invalid() {
        assert!(matches!(column_index(-1), Err(AssayError::InvalidArgument(_))));
        assert_eq!(column_index(2).unwrap(), 2);
    }
}
