//! Terminal report formatting.
//!
//! We keep formatting code in one place so:
//! - the assay/math code stays clean and testable
//! - output changes are localized

use clap::ValueEnum;

use crate::app::pipeline::AssayRun;
use crate::domain::{AssayConfig, BlankMode, ConcentrationEstimate, LinearFit, StandardCurveChart};

/// Format the fitted line as an equation, folding the intercept's sign into
/// the operator: `y = 2 * x + 3` or `y = 2 * x - 3`.
pub fn format_equation(fit: &LinearFit) -> String {
    if fit.intercept >= 0.0 {
        format!("y = {} * x + {}", fit.slope, fit.intercept)
    } else {
        format!("y = {} * x - {}", fit.slope, fit.intercept.abs())
    }
}

/// Format the full run summary (standards, samples, result, fit quality).
pub fn format_run_summary(run: &AssayRun, config: &AssayConfig) -> String {
    let mut out = String::new();

    out.push_str("=== picogreen - Standard Curve Analysis ===\n");
    out.push_str(&format!("Source: {}\n", config.source.display()));
    out.push_str(&format!("Blank correction: {}\n", blank_mode_name(config.blank_mode)));
    out.push('\n');

    out.push_str("Standards:\n");
    out.push_str(&format_standards(&run.chart));
    out.push('\n');

    out.push_str("Samples:\n");
    out.push_str(&format_samples(&run.estimate));
    out.push('\n');

    out.push_str(&format_result(&run.fit, run.r_squared, run.estimate.concentration));
    out
}

/// The headline lines: concentration, equation and R².
pub fn format_result(fit: &LinearFit, r_squared: f64, concentration: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Original sample concentration: {concentration} pg/µl\n"
    ));
    out.push_str(&format!("Linear equation:               {}\n", format_equation(fit)));
    out.push_str(&format!("R²:                            {r_squared}\n"));
    out
}

/// The `--blank-mode` value that selects `mode`.
fn blank_mode_name(mode: BlankMode) -> String {
    mode.to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_else(|| format!("{mode:?}"))
}

fn format_standards(chart: &StandardCurveChart) -> String {
    let mut out = String::new();
    out.push_str(format!("{:>14} {:>14} {:>14} {:>12}", "conc [pg/µl]", "observed", "fitted", "residual").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<14} {:-<14} {:-<14} {:-<12}", "", "", "", "").trim_end());
    out.push('\n');

    for ((x, y), fitted) in chart.x.iter().zip(&chart.observed).zip(&chart.fitted) {
        out.push_str(&format!(
            "{x:>14.3} {y:>14.3} {fitted:>14.3} {:>12.3}\n",
            y - fitted
        ));
    }
    out
}

fn format_samples(estimate: &ConcentrationEstimate) -> String {
    let mut out = String::new();
    out.push_str(format!("{:>10} {:>14} {:>16} {:>16}", "dilution", "signal", "diluted conc", "original conc").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<10} {:-<14} {:-<16} {:-<16}", "", "", "", "").trim_end());
    out.push('\n');

    for i in 0..estimate.contributions.len() {
        out.push_str(&format!(
            "{:>10.3} {:>14.3} {:>16.4} {:>16.4}\n",
            estimate.dilutions[i], estimate.signals[i], estimate.back_calculated[i], estimate.contributions[i],
        ));
    }
    out
}
