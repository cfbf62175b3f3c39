//! Spreadsheet reading
//!
//! Turns the first worksheet into loosely typed rows keyed by header text.
//! The first row is the header. Header cells are named the way common
//! sheet-to-JSON converters name them: blank headers become `__EMPTY`,
//! `__EMPTY_1`, `__EMPTY_2`, … and repeated headers get `_1`, `_2` suffixes.
//! Rows with no non-empty cell are dropped.

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const EMPTY_HEADER: &str = "__EMPTY";

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// True for missing values and blank text
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(_) => false,
            CellValue::Empty => true,
        }
    }
}

/// One data row: header name to cell value (empty cells omitted)
pub type RawRow = HashMap<String, CellValue>;

/// Spreadsheet reading errors (fatal for an import run)
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Spreadsheet not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to open spreadsheet {path}: {message}")]
    Open { path: PathBuf, message: String },

    #[error("Spreadsheet has no worksheets")]
    NoWorksheets,

    #[error("Failed to read worksheet {sheet}: {message}")]
    Worksheet { sheet: String, message: String },
}

/// Read the first worksheet of a spreadsheet file
pub fn read_first_sheet(path: &Path) -> Result<Vec<RawRow>, ReadError> {
    if !path.exists() {
        return Err(ReadError::NotFound(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| ReadError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ReadError::NoWorksheets)?;

    tracing::debug!(sheet = %sheet, "Reading worksheet");

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| ReadError::Worksheet {
            sheet: sheet.clone(),
            message: e.to_string(),
        })?;

    Ok(rows_from_range(&range))
}

/// Convert a cell range into header-keyed rows
pub fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let headers = header_names(header_row);

    rows.filter_map(|row| {
        let raw: RawRow = headers
            .iter()
            .zip(row)
            .map(|(header, cell)| (header.clone(), cell_value(cell)))
            .filter(|(_, value)| *value != CellValue::Empty)
            .collect();

        (!raw.is_empty()).then_some(raw)
    })
    .collect()
}

/// Name header cells, filling blanks and disambiguating repeats
fn header_names(header_row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header_row
        .iter()
        .map(|cell| {
            let text = cell_text(cell);
            let base = if text.trim().is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                text
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Render a number the way a spreadsheet shows it (`12`, not `12.0`)
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_of(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_named_headers() {
        let range = range_of(&[
            &[text("Roll No."), text("Student Name"), text("Zero Test Marks")],
            &[Data::Float(101.0), text(" Ali "), Data::Float(77.0)],
        ]);

        let rows = rows_from_range(&range);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Roll No."], CellValue::Number(101.0));
        assert_eq!(rows[0]["Student Name"], CellValue::Text(" Ali ".to_string()));
        assert_eq!(rows[0]["Zero Test Marks"], CellValue::Number(77.0));
    }

    #[test]
    fn test_blank_headers_get_positional_names() {
        let headers = header_names(&[
            text("Zero Test"),
            Data::Empty,
            Data::Empty,
            text("  "),
            Data::Empty,
        ]);
        assert_eq!(
            headers,
            vec!["Zero Test", "__EMPTY", "__EMPTY_1", "__EMPTY_2", "__EMPTY_3"]
        );
    }

    #[test]
    fn test_repeated_headers_are_suffixed() {
        let headers = header_names(&[text("Name"), text("Name"), Data::Int(5), text("Name")]);
        assert_eq!(headers, vec!["Name", "Name_1", "5", "Name_2"]);
    }

    #[test]
    fn test_blank_rows_dropped_and_empty_cells_omitted() {
        let range = range_of(&[
            &[text("A"), text("B")],
            &[Data::Empty, Data::Empty],
            &[text("x"), Data::Empty],
        ]);

        let rows = rows_from_range(&range);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
        assert!(!rows[0].contains_key("B"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(12.5), "12.5");
    }

    #[test]
    fn test_cell_blankness() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("   ".to_string()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_missing_file() {
        let err = read_first_sheet(Path::new("/nonexistent/students.xlsx")).unwrap_err();
        assert!(matches!(err, ReadError::NotFound(_)));
    }
}
