//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves the run configuration
//! - runs the assay pipeline
//! - prints the report/plot
//! - writes optional exports

use std::path::PathBuf;

use clap::Parser;

use crate::assay::column_index;
use crate::cli::{AnalyzeArgs, Command, PlotArgs};
use crate::domain::{AssayConfig, RowLabels};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable naming the source file when none is given on the command line.
pub const INPUT_ENV: &str = "PICOGREEN_INPUT";

/// Entry point for the `picogreen` binary.
pub fn run() -> Result<(), AppError> {
    // We want `picogreen plate.csv` and `picogreen --blank-mode mean` to behave
    // like `picogreen analyze ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_logging(cli.verbose);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    // A second init (e.g. in tests) is harmless.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = assay_config_from_args(&args)?;
    let run = pipeline::run_assay(&config)?;

    println!("{}", crate::report::format_run_summary(&run, &config));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&run.chart, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_results_json(path, &run, &config)?;
    }
    if let Some(path) = &config.chart_svg {
        crate::plot::write_chart_svg(path, &run.chart, 800, 600)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let results = crate::io::export::read_results_json(&args.results)?;

    println!(
        "{}",
        crate::report::format_result(&results.fit, results.r_squared, results.concentration_pg_per_ul)
    );
    println!("{}", crate::plot::render_ascii_plot(&results.chart, args.width, args.height));
    Ok(())
}

pub fn assay_config_from_args(args: &AnalyzeArgs) -> Result<AssayConfig, AppError> {
    Ok(AssayConfig {
        source: resolve_source(args.input.clone()),
        primary_sheet: args.sheet.clone(),
        label_column: column_index(args.label_column)?,
        labels: RowLabels {
            blank: args.blank_label.as_str().into(),
            standard_concentration: args.concentration_label.as_str().into(),
            standard_signal: args.standard_label.as_str().into(),
            dilutions: args.dilution_label.as_str().into(),
            sample_signal: args.sample_label.as_str().into(),
        },
        blank_mode: args.blank_mode,
        numeric_cells: args.numeric_cells,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_json: args.export_json.clone(),
        chart_svg: args.chart.clone(),
    })
}

/// Source path: command line, then `PICOGREEN_INPUT` (environment or `.env`),
/// then the default.
fn resolve_source(input: Option<PathBuf>) -> PathBuf {
    if let Some(path) = input {
        return path;
    }
    dotenvy::dotenv().ok();
    std::env::var_os(INPUT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| AssayConfig::default().source)
}

/// Rewrite argv so `picogreen` defaults to `picogreen analyze`.
///
/// Rules:
/// - `picogreen`                      -> `picogreen analyze`
/// - `picogreen plate.csv ...`        -> `picogreen analyze plate.csv ...`
/// - `picogreen --blank-mode mean`    -> `picogreen analyze --blank-mode mean`
/// - `picogreen --help/--version/-h`  -> unchanged (show top-level help/version)
///
/// Only the first token after the global flags is inspected, so option values
/// such as `--sample-label plot` never count as a subcommand.
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let first = argv
        .iter()
        .skip(1)
        .find(|a| !matches!(a.as_str(), "-v" | "--verbose"))
        .cloned();
    let Some(first) = first else {
        argv.push("analyze".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        first.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    let is_subcommand = matches!(first.as_str(), "analyze" | "plot");
    if is_top_level_help_or_version || is_subcommand {
        return argv;
    }

    argv.insert(1, "analyze".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Label;
    use crate::error::AssayError;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_and_paths_run_analyze() {
        assert_eq!(rewrite_args(argv(&["picogreen"])), argv(&["picogreen", "analyze"]));
        assert_eq!(
            rewrite_args(argv(&["picogreen", "plate.csv"])),
            argv(&["picogreen", "analyze", "plate.csv"])
        );
        assert_eq!(
            rewrite_args(argv(&["picogreen", "-v", "plate.csv"])),
            argv(&["picogreen", "analyze", "-v", "plate.csv"])
        );
        assert_eq!(rewrite_args(argv(&["picogreen", "--help"])), argv(&["picogreen", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["picogreen", "-v", "analyze", "plate.csv"])),
            argv(&["picogreen", "-v", "analyze", "plate.csv"])
        );
        assert_eq!(
            rewrite_args(argv(&["picogreen", "plot", "--results", "r.json"])),
            argv(&["picogreen", "plot", "--results", "r.json"])
        );
        assert_eq!(rewrite_args(argv(&["picogreen", "-v"])), argv(&["picogreen", "-v", "analyze"]));
    }

    #[test]
    fn subcommand_names_as_option_values_still_run_analyze() {
        let out = rewrite_args(argv(&["picogreen", "plate.csv", "--sample-label", "plot"]));
        assert_eq!(out, argv(&["picogreen", "analyze", "plate.csv", "--sample-label", "plot"]));

        let cli = crate::cli::Cli::try_parse_from(out).unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.sample_label, "plot");
        assert_eq!(args.input, Some(PathBuf::from("plate.csv")));
    }

    #[test]
    fn config_carries_labels_and_rejects_negative_column() {
        let cli = crate::cli::Cli::parse_from(["picogreen", "analyze", "plate.json", "--sample-label", "Sample A"]);
        let Command::Analyze(mut args) = cli.command else {
            panic!("expected analyze");
        };

        let config = assay_config_from_args(&args).unwrap();
        assert_eq!(config.source, PathBuf::from("plate.json"));
        assert_eq!(config.labels.sample_signal, Label::from("Sample A"));
        assert_eq!(config.labels.blank, Label::from("Mean Blank"));
        assert!(config.plot);

        args.label_column = -2;
        let err = assay_config_from_args(&args).unwrap_err();
        let expected: AppError =
            AssayError::InvalidArgument("Column index must be zero or positive, got -2".to_string()).into();
        assert_eq!(err.exit_code(), expected.exit_code());
        assert_eq!(err.to_string(), expected.to_string());
    }
}
