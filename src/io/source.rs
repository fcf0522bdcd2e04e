//! Tabular source loading.
//!
//! A source is a small workbook: an ordered list of sheets, each a grid of
//! typed cells. Two on-disk formats are understood, dispatched by extension:
//!
//! - `.json`: a workbook with named sheets and typed cells
//!
//!   ```json
//!   { "sheets": [ { "name": "Input", "rows": [ ["Mean Blank", 12.5, 13.0] ] } ] }
//!   ```
//!
//!   Integers (no fraction/exponent) load as `Cell::Int`, and are rejected
//!   beyond the `i64` range. Other numbers load as `Cell::Float`, strings as
//!   `Cell::Text`, booleans as `Cell::Bool`, `null` as `Cell::Empty`.
//!
//! - `.csv`: a single unnamed sheet. As in a spreadsheet, every numeric cell is
//!   a double, so numbers load as `Cell::Float`.
//!
//! No analysis logic lives here.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::Cell;
use crate::error::{AppError, AssayError};

/// One sheet of a workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// `None` for formats without sheet names (CSV).
    pub name: Option<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: Option<&str>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.map(str::to_string),
            rows,
        }
    }

    /// Cell at `(row, column)`; cells past the end of a short row are empty.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&Cell::Empty)
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }
}

/// An opened tabular source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet_names(&self) -> Vec<Option<&str>> {
        self.sheets.iter().map(|s| s.name.as_deref()).collect()
    }

    pub fn sheet_by_index(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Open a source file, choosing the reader by extension.
    pub fn open(path: &Path) -> Result<Self, AssayError> {
        if path.as_os_str().is_empty() {
            return Err(AssayError::InvalidArgument(
                "Source path must not be empty.".to_string(),
            ));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let reader: fn(File) -> Result<Workbook, AssayError> = match ext.as_str() {
            "csv" => load_csv,
            "json" => load_json,
            other => {
                return Err(AssayError::InvalidArgument(format!(
                    "Unsupported source '{}': expected a .csv or .json file, got '.{other}'",
                    path.display()
                )));
            }
        };

        if path.is_dir() {
            return Err(AssayError::InvalidArgument(format!(
                "Source '{}' is a directory, not a file",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| AssayError::SourceNotFound {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let workbook = reader(file)?;
        log::info!(
            "Opened source '{}' ({} sheet(s))",
            path.display(),
            workbook.sheets.len()
        );
        Ok(workbook)
    }

    /// Write the workbook in the JSON workbook format.
    ///
    /// Unnamed sheets are written as `Sheet<n>` (1-based).
    pub fn write_json(&self, path: &Path) -> Result<(), AppError> {
        let file = File::create(path).map_err(|e| {
            AppError::new(2, format!("Failed to create workbook '{}': {e}", path.display()))
        })?;

        let doc = WorkbookFile {
            sheets: self
                .sheets
                .iter()
                .enumerate()
                .map(|(i, sheet)| SheetFile {
                    name: sheet.name.clone().unwrap_or_else(|| format!("Sheet{}", i + 1)),
                    rows: sheet
                        .rows
                        .iter()
                        .map(|row| row.iter().map(cell_to_json).collect())
                        .collect(),
                })
                .collect(),
        };

        serde_json::to_writer_pretty(file, &doc)
            .map_err(|e| AppError::new(2, format!("Failed to write workbook JSON: {e}")))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WorkbookFile {
    sheets: Vec<SheetFile>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SheetFile {
    name: String,
    #[serde(default)]
    rows: Vec<Vec<JsonValue>>,
}

fn load_json(file: File) -> Result<Workbook, AssayError> {
    let doc: WorkbookFile = serde_json::from_reader(file)
        .map_err(|e| AssayError::SchemaViolation(format!("Invalid workbook JSON: {e}")))?;

    let mut sheets = Vec::with_capacity(doc.sheets.len());
    for sheet in doc.sheets {
        let mut rows = Vec::with_capacity(sheet.rows.len());
        for (r, row) in sheet.rows.iter().enumerate() {
            let cells = row
                .iter()
                .enumerate()
                .map(|(c, v)| {
                    json_to_cell(v).map_err(|reason| {
                        AssayError::SchemaViolation(format!(
                            "Sheet '{}', row {}, column {c}: {reason}",
                            sheet.name,
                            r + 1
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
        sheets.push(Sheet {
            name: Some(sheet.name),
            rows,
        });
    }

    Ok(Workbook { sheets })
}

fn json_to_cell(val: &JsonValue) -> Result<Cell, &'static str> {
    match val {
        JsonValue::Null => Ok(Cell::Empty),
        JsonValue::Bool(b) => Ok(Cell::Bool(*b)),
        JsonValue::String(s) if s.is_empty() => Ok(Cell::Empty),
        JsonValue::String(s) => Ok(Cell::Text(s.clone())),
        JsonValue::Number(n) if n.is_i64() || n.is_u64() => n
            .as_i64()
            .map(Cell::Int)
            .ok_or("integer does not fit in a 64-bit signed cell"),
        JsonValue::Number(n) => n.as_f64().map(Cell::Float).ok_or("number is not representable"),
        JsonValue::Array(_) | JsonValue::Object(_) => Err("nested values are not valid cells"),
    }
}

fn cell_to_json(cell: &Cell) -> JsonValue {
    match cell {
        Cell::Empty => JsonValue::Null,
        Cell::Text(s) => JsonValue::String(s.clone()),
        Cell::Bool(b) => JsonValue::Bool(*b),
        Cell::Int(i) => JsonValue::from(*i),
        // Non-finite floats have no JSON form.
        Cell::Float(v) => serde_json::Number::from_f64(*v)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
    }
}

fn load_csv(file: File) -> Result<Workbook, AssayError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            AssayError::SchemaViolation(format!("CSV parse error on line {}: {e}", idx + 1))
        })?;
        rows.push(record.iter().map(parse_csv_cell).collect());
    }

    Ok(Workbook {
        sheets: vec![Sheet { name: None, rows }],
    })
}

fn parse_csv_cell(raw: &str) -> Cell {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first cell. Left in place it would break label matching on row 1.
    let s = raw.trim_start_matches('\u{feff}').trim();
    if s.is_empty() {
        return Cell::Empty;
    }
    if s.eq_ignore_ascii_case("true") {
        return Cell::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Cell::Bool(false);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Float(v),
        _ => Cell::Text(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("picogreen_source_{}_{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_numbers_load_as_floats() {
        let path = temp_file("plate.csv", "\u{feff}Mean Blank,12,12.5\nnote,,TRUE\n");
        let wb = Workbook::open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(wb.sheets.len(), 1);
        assert_eq!(wb.sheets[0].name, None);
        assert_eq!(
            wb.sheets[0].rows[0],
            vec![
                Cell::Text("Mean Blank".to_string()),
                Cell::Float(12.0),
                Cell::Float(12.5)
            ]
        );
        assert_eq!(
            wb.sheets[0].rows[1],
            vec![Cell::Text("note".to_string()), Cell::Empty, Cell::Bool(true)]
        );
    }

    #[test]
    fn json_keeps_integer_and_float_cells_apart() {
        let path = temp_file(
            "plate.json",
            r#"{"sheets":[{"name":"Input","rows":[["Mean Blank",1,1.5,null,true,""]]},{"name":"Notes"}]}"#,
        );
        let wb = Workbook::open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(wb.sheet_names(), vec![Some("Input"), Some("Notes")]);
        assert_eq!(
            wb.sheets[0].rows[0],
            vec![
                Cell::Text("Mean Blank".to_string()),
                Cell::Int(1),
                Cell::Float(1.5),
                Cell::Empty,
                Cell::Bool(true),
                Cell::Empty
            ]
        );
    }

    #[test]
    fn json_rejects_nested_cells() {
        let path = temp_file("nested.json", r#"{"sheets":[{"name":"Input","rows":[["a",[1]]]}]}"#);
        let err = Workbook::open(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, AssayError::SchemaViolation(_)));
    }

    #[test]
    fn json_integers_past_i64_are_not_floats() {
        let path = temp_file("huge.json", r#"{"sheets":[{"name":"Input","rows":[["a",18446744073709551615]]}]}"#);
        let err = Workbook::open(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        match err {
            AssayError::SchemaViolation(msg) => assert!(msg.contains("64-bit"), "{msg}"),
            other => panic!("expected a schema violation, got {other:?}"),
        }
    }

    #[test]
    fn directory_is_invalid_argument() {
        let dir = std::env::temp_dir().join(format!("picogreen_dir_{}.csv", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let err = Workbook::open(&dir).unwrap_err();
        std::fs::remove_dir(&dir).ok();
        match err {
            AssayError::InvalidArgument(msg) => assert!(msg.contains("directory"), "{msg}"),
            other => panic!("expected an invalid argument, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let path = std::env::temp_dir().join("picogreen_definitely_missing.csv");
        let err = Workbook::open(&path).unwrap_err();
        assert!(matches!(err, AssayError::SourceNotFound { .. }));
    }

    #[test]
    fn unsupported_extension_is_invalid_argument() {
        let err = Workbook::open(Path::new("plate.xls")).unwrap_err();
        assert!(matches!(err, AssayError::InvalidArgument(_)));
        let err = Workbook::open(Path::new("")).unwrap_err();
        assert!(matches!(err, AssayError::InvalidArgument(_)));
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let sheet = Sheet::new(Some("Input"), vec![vec![Cell::Int(1)]]);
        assert_eq!(sheet.cell(0, 3), &Cell::Empty);
        assert_eq!(sheet.cell(5, 0), &Cell::Empty);
    }

    #[test]
    fn json_written_workbook_reads_back() {
        let wb = Workbook::new(vec![Sheet::new(
            Some("Input"),
            vec![vec![Cell::Text("Mean Sample".to_string()), Cell::Float(2.0), Cell::Int(3)]],
        )]);
        let path = std::env::temp_dir().join(format!("picogreen_written_{}.json", std::process::id()));
        wb.write_json(&path).unwrap();
        let back = Workbook::open(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back, wb);
    }
}
