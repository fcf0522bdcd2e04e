//! Export run results.
//!
//! - per-sample CSV table, easy to consume in spreadsheets or downstream scripts
//! - results JSON: fit, R², final concentration and chart data, reloadable for plotting
//!
//! The JSON schema is defined by `domain::ResultsFile`.

use std::fs::File;
use std::path::Path;

use chrono::Local;

use crate::app::pipeline::AssayRun;
use crate::domain::{AssayConfig, ResultsFile};
use crate::error::AppError;

/// Write per-sample results to a CSV file.
pub fn write_results_csv(path: &Path, run: &AssayRun) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record([
            "reading",
            "dilution",
            "signal",
            "diluted_conc_pg_per_ul",
            "original_conc_pg_per_ul",
        ])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let est = &run.estimate;
    for i in 0..est.contributions.len() {
        writer
            .write_record([
                (i + 1).to_string(),
                est.dilutions[i].to_string(),
                format!("{:.6}", est.signals[i]),
                format!("{:.6}", est.back_calculated[i]),
                format!("{:.6}", est.contributions[i]),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))?;
    log::info!("Wrote results table to '{}'", path.display());
    Ok(())
}

/// Write a results JSON file.
pub fn write_results_json(path: &Path, run: &AssayRun, config: &AssayConfig) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create results JSON '{}': {e}", path.display())))?;

    let results = ResultsFile {
        tool: "picogreen".to_string(),
        generated: Local::now(),
        source: config.source.display().to_string(),
        blank_mode: config.blank_mode,
        fit: run.fit,
        r_squared: run.r_squared,
        concentration_pg_per_ul: run.estimate.concentration,
        chart: run.chart.clone(),
        samples: run.estimate.clone(),
    };

    serde_json::to_writer_pretty(file, &results)
        .map_err(|e| AppError::new(2, format!("Failed to write results JSON: {e}")))?;
    log::info!("Wrote results to '{}'", path.display());
    Ok(())
}

/// Read a results JSON file.
pub fn read_results_json(path: &Path) -> Result<ResultsFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open results JSON '{}': {e}", path.display())))?;
    let results: ResultsFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid results JSON: {e}")))?;
    Ok(results)
}
