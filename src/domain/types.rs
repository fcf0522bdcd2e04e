//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - passed stage to stage through the assay pipeline
//! - handed to the report printer and chart renderers
//! - exported to JSON/CSV and reloaded later for plotting

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default row labels of the Picogreen plate-reader template.
pub const DEFAULT_BLANK_LABEL: &str = "Mean Blank";
pub const DEFAULT_STANDARD_CONCENTRATION_LABEL: &str = "Standard Concentration [pg/µl]";
pub const DEFAULT_STANDARD_SIGNAL_LABEL: &str = "Mean Standard";
pub const DEFAULT_DILUTIONS_LABEL: &str = "Dilutions used for sample";
pub const DEFAULT_SAMPLE_SIGNAL_LABEL: &str = "Mean Sample";

/// Name the primary sheet must carry (and it must come first).
pub const DEFAULT_PRIMARY_SHEET: &str = "Input";

/// A single typed cell of a tabular source.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Row label: the key a series is found under, both in the source and in a [`Dataset`].
///
/// Labels are usually text, but a spreadsheet may just as well use numbers
/// in its label column.
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    Text(String),
    Number(f64),
}

impl Label {
    /// Whether `cell` holds this label.
    ///
    /// Text labels compare exactly (no trimming, case-sensitive). Numeric labels
    /// compare by value against integer and floating-point cells alike.
    pub fn matches(&self, cell: &Cell) -> bool {
        match (self, cell) {
            (Label::Text(label), Cell::Text(text)) => label == text,
            (Label::Number(n), Cell::Float(v)) => n == v,
            (Label::Number(n), Cell::Int(i)) => *n == *i as f64,
            _ => false,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Text(s) => write!(f, "{s}"),
            Label::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

impl From<f64> for Label {
    fn from(value: f64) -> Self {
        Label::Number(value)
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Number(value as f64)
    }
}

/// A labeled, ordered sequence of measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub label: Label,
    pub values: Vec<f64>,
}

/// Series collected for one pipeline run, keyed by label.
///
/// Created empty, filled by row extraction, rewritten in place by blank
/// correction. Entries keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    entries: Vec<NamedSeries>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a series, overwriting any existing entry under the same label.
    pub fn insert(&mut self, label: Label, values: Vec<f64>) {
        match self.entries.iter_mut().find(|s| s.label == label) {
            Some(existing) => existing.values = values,
            None => self.entries.push(NamedSeries { label, values }),
        }
    }

    pub fn get(&self, label: &Label) -> Option<&[f64]> {
        self.entries
            .iter()
            .find(|s| &s.label == label)
            .map(|s| s.values.as_slice())
    }

    pub fn series(&self) -> &[NamedSeries] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fitted standard curve: `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// How the blank series is removed from a signal series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BlankMode {
    /// Every target value minus every blank value (outer loop target, inner loop blank).
    ///
    /// With more than one blank value the corrected series grows to
    /// `len(target) * len(blank)`.
    #[default]
    CrossProduct,
    /// Every target value minus the mean of the blank series.
    Mean,
}

/// Which numeric cells count as measurements when a row is extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum NumericCells {
    /// Only floating-point cells. Integer cells are dropped with the text and blanks.
    #[default]
    FloatOnly,
    /// Floating-point and integer cells.
    AnyNumeric,
}

/// Row labels the pipeline pulls from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabels {
    pub blank: Label,
    pub standard_concentration: Label,
    pub standard_signal: Label,
    pub dilutions: Label,
    pub sample_signal: Label,
}

impl RowLabels {
    /// All labels in extraction order.
    pub fn required(&self) -> [&Label; 5] {
        [
            &self.blank,
            &self.standard_concentration,
            &self.standard_signal,
            &self.dilutions,
            &self.sample_signal,
        ]
    }

    /// Labels whose series get blank-corrected.
    pub fn blank_corrected(&self) -> [&Label; 2] {
        [&self.standard_signal, &self.sample_signal]
    }
}

impl Default for RowLabels {
    fn default() -> Self {
        Self {
            blank: DEFAULT_BLANK_LABEL.into(),
            standard_concentration: DEFAULT_STANDARD_CONCENTRATION_LABEL.into(),
            standard_signal: DEFAULT_STANDARD_SIGNAL_LABEL.into(),
            dilutions: DEFAULT_DILUTIONS_LABEL.into(),
            sample_signal: DEFAULT_SAMPLE_SIGNAL_LABEL.into(),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AssayConfig {
    pub source: PathBuf,
    pub primary_sheet: String,
    /// Column holding the row labels.
    pub label_column: usize,
    pub labels: RowLabels,
    pub blank_mode: BlankMode,
    pub numeric_cells: NumericCells,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub chart_svg: Option<PathBuf>,
}

impl Default for AssayConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("input.csv"),
            primary_sheet: DEFAULT_PRIMARY_SHEET.to_string(),
            label_column: 0,
            labels: RowLabels::default(),
            blank_mode: BlankMode::default(),
            numeric_cells: NumericCells::default(),
            plot: true,
            plot_width: 72,
            plot_height: 20,
            export_results: None,
            export_json: None,
            chart_svg: None,
        }
    }
}

/// Back-calculated sample concentration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationEstimate {
    /// Dilution factor per sample reading.
    pub dilutions: Vec<f64>,
    /// Blank-corrected fluorescence per sample reading.
    pub signals: Vec<f64>,
    /// `(signal - intercept) / slope` per reading (diluted concentration).
    pub back_calculated: Vec<f64>,
    /// `dilution * back_calculated` per reading (original concentration).
    pub contributions: Vec<f64>,
    /// Mean of `contributions`.
    pub concentration: f64,
}

/// Series handed to a chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardCurveChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Standard concentrations.
    pub x: Vec<f64>,
    /// Observed (blank-corrected) standard fluorescence.
    pub observed: Vec<f64>,
    /// Regression line evaluated at each `x`.
    pub fitted: Vec<f64>,
}

impl StandardCurveChart {
    pub const TITLE: &'static str = "Standard Curve";
    pub const X_LABEL: &'static str = "DNA concentration [pg/µl]";
    pub const Y_LABEL: &'static str = "Fluorescence Value [a.u.]";

    pub fn new(x: &[f64], observed: &[f64], fit: &LinearFit) -> Self {
        Self {
            title: Self::TITLE.to_string(),
            x_label: Self::X_LABEL.to_string(),
            y_label: Self::Y_LABEL.to_string(),
            x: x.to_vec(),
            observed: observed.to_vec(),
            fitted: x.iter().map(|&v| fit.predict(v)).collect(),
        }
    }

    pub fn observed_points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.observed.iter().copied()).collect()
    }

    pub fn fitted_points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.fitted.iter().copied()).collect()
    }
}

/// A saved results file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsFile {
    pub tool: String,
    pub generated: DateTime<Local>,
    pub source: String,
    pub blank_mode: BlankMode,
    pub fit: LinearFit,
    pub r_squared: f64,
    pub concentration_pg_per_ul: f64,
    pub chart: StandardCurveChart,
    pub samples: ConcentrationEstimate,
}
