//! Shared assay pipeline used by the `analyze` command and by tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! extract rows -> blank correction -> standard curve fit -> back-calculation -> R²
//!
//! The caller then focuses on presentation (printing, charts, exports).

use crate::assay::{RowExtractor, estimate_concentration, subtract_blank, validate_pair};
use crate::domain::{AssayConfig, ConcentrationEstimate, Dataset, Label, LinearFit, StandardCurveChart};
use crate::error::AssayError;
use crate::io::source::Workbook;
use crate::math::{fit_line, r_squared};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct AssayRun {
    pub fit: LinearFit,
    pub r_squared: f64,
    pub estimate: ConcentrationEstimate,
    pub chart: StandardCurveChart,
}

/// Open the configured source and run the full pipeline.
pub fn run_assay(config: &AssayConfig) -> Result<AssayRun, AssayError> {
    let workbook = Workbook::open(&config.source)?;
    run_assay_with_workbook(config, workbook)
}

/// Run the pipeline on an already opened workbook.
pub fn run_assay_with_workbook(config: &AssayConfig, workbook: Workbook) -> Result<AssayRun, AssayError> {
    let labels = &config.labels;

    // 1) Pull every required row.
    let extractor = RowExtractor::new(workbook, config.primary_sheet.as_str())
        .with_numeric_cells(config.numeric_cells);
    let mut dataset = Dataset::new();
    for label in labels.required() {
        dataset = extractor.extract(label, config.label_column, dataset)?;
    }
    log::info!("Extracted {} rows", dataset.len());

    // 2) Remove the carrier fluorescence from the signal rows.
    for label in labels.blank_corrected() {
        dataset = subtract_blank(dataset, label, &labels.blank, config.blank_mode)?;
    }

    // 3) Standard curve.
    let concentrations = series(&dataset, &labels.standard_concentration)?;
    let standards = series(&dataset, &labels.standard_signal)?;
    let fit = fit_line(concentrations, standards)?;

    // 4) Back-calculate the sample.
    let (dilutions, signals) = validate_pair(
        series(&dataset, &labels.dilutions)?,
        series(&dataset, &labels.sample_signal)?,
    )?;
    let estimate = estimate_concentration(&fit, &dilutions, &signals)?;
    log::info!("Sample concentration: {} pg/µl", estimate.concentration);

    // 5) Fit quality and chart data.
    let r_squared = r_squared(concentrations, standards)?;
    let chart = StandardCurveChart::new(concentrations, standards, &fit);

    Ok(AssayRun {
        fit,
        r_squared,
        estimate,
        chart,
    })
}

fn series<'a>(dataset: &'a Dataset, label: &Label) -> Result<&'a [f64], AssayError> {
    dataset
        .get(label)
        .ok_or_else(|| AssayError::KeyNotFound(label.to_string()))
}
