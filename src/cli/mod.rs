//! Command-line parsing for the Picogreen standard curve analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the assay/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{
    BlankMode, DEFAULT_BLANK_LABEL, DEFAULT_DILUTIONS_LABEL, DEFAULT_PRIMARY_SHEET, DEFAULT_SAMPLE_SIGNAL_LABEL,
    DEFAULT_STANDARD_CONCENTRATION_LABEL, DEFAULT_STANDARD_SIGNAL_LABEL, NumericCells,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "picogreen", version, about = "Picogreen DNA quantification from a standard curve")]
pub struct Cli {
    /// Log progress (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the standard curve, back-calculate the sample and print the report.
    Analyze(AnalyzeArgs),
    /// Plot a previously exported results JSON.
    Plot(PlotArgs),
}

/// Options for analyzing a plate-reader export.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Plate-reader export (.csv or .json workbook).
    ///
    /// Falls back to `PICOGREEN_INPUT` (environment or `.env`), then `input.csv`.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Sheet that must come first in a workbook.
    #[arg(long, default_value = DEFAULT_PRIMARY_SHEET)]
    pub sheet: String,

    /// Column holding the row labels (0 = first column).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub label_column: i64,

    /// Label of the blank row.
    #[arg(long, default_value = DEFAULT_BLANK_LABEL)]
    pub blank_label: String,

    /// Label of the standard concentration row.
    #[arg(long, default_value = DEFAULT_STANDARD_CONCENTRATION_LABEL)]
    pub concentration_label: String,

    /// Label of the standard fluorescence row.
    #[arg(long, default_value = DEFAULT_STANDARD_SIGNAL_LABEL)]
    pub standard_label: String,

    /// Label of the sample dilution row.
    #[arg(long, default_value = DEFAULT_DILUTIONS_LABEL)]
    pub dilution_label: String,

    /// Label of the sample fluorescence row.
    #[arg(long, default_value = DEFAULT_SAMPLE_SIGNAL_LABEL)]
    pub sample_label: String,

    /// How the blank is subtracted from the signal rows.
    #[arg(long, value_enum, default_value_t = BlankMode::CrossProduct)]
    pub blank_mode: BlankMode,

    /// Which numeric cells count as measurements.
    #[arg(long, value_enum, default_value_t = NumericCells::FloatOnly)]
    pub numeric_cells: NumericCells,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export per-sample results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export fit, R², concentration and chart data to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Render the standard curve to an SVG file.
    #[arg(long, value_name = "SVG")]
    pub chart: Option<PathBuf>,
}

/// Options for plotting saved results.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Results JSON file produced by `picogreen analyze --export-json`.
    #[arg(long, value_name = "JSON")]
    pub results: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_plate_template() {
        let cli = Cli::parse_from(["picogreen", "analyze", "plate.csv"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.input, Some(PathBuf::from("plate.csv")));
        assert_eq!(args.sheet, "Input");
        assert_eq!(args.label_column, 0);
        assert_eq!(args.blank_label, "Mean Blank");
        assert_eq!(args.concentration_label, "Standard Concentration [pg/µl]");
        assert_eq!(args.blank_mode, BlankMode::CrossProduct);
        assert_eq!(args.numeric_cells, NumericCells::FloatOnly);
    }

    #[test]
    fn negative_label_column_parses() {
        let cli = Cli::parse_from(["picogreen", "analyze", "--label-column", "-1", "--blank-mode", "mean"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.label_column, -1);
        assert_eq!(args.blank_mode, BlankMode::Mean);
    }
}
