//! Row normalization
//!
//! Maps loosely typed spreadsheet rows onto [`NewStudent`] records. Each
//! target field is looked up under a header name first and a positional
//! placeholder second; the first present, non-blank value wins.

use thiserror::Error;
use tracing::{debug, warn};
use ztr_common::models::{NewStudent, DEFAULT_TOTAL_MARKS};

use crate::reader::{format_number, CellValue, RawRow};

/// Header name and positional fallback for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKeys {
    pub primary: &'static str,
    pub fallback: &'static str,
}

pub const ROLL_NUMBER_KEYS: FieldKeys = FieldKeys {
    primary: "Roll No.",
    fallback: "__EMPTY_1",
};
pub const NAME_KEYS: FieldKeys = FieldKeys {
    primary: "Student Name",
    fallback: "__EMPTY_2",
};
pub const FATHER_NAME_KEYS: FieldKeys = FieldKeys {
    primary: "Father Name",
    fallback: "__EMPTY_3",
};
pub const MARKS_KEYS: FieldKeys = FieldKeys {
    primary: "Zero Test Marks",
    fallback: "__EMPTY_4",
};

/// Why an obtained-marks value was refused
#[derive(Debug, Error, PartialEq)]
pub enum MarksError {
    #[error("marks value {0:?} is not an integer")]
    NotInteger(String),

    #[error("marks value {0} is negative")]
    Negative(i64),

    #[error("marks value is not a finite number")]
    NotFinite,
}

/// Normalizer output
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NormalizedRows {
    pub students: Vec<NewStudent>,
    /// Rows missing roll number, name, or father name
    pub skipped: usize,
    /// Rows whose obtained marks could not be read as a non-negative integer
    pub rejected: usize,
}

/// Resolve a field by primary key, then fallback key
pub fn resolve<'a>(row: &'a RawRow, keys: FieldKeys) -> Option<&'a CellValue> {
    [keys.primary, keys.fallback]
        .into_iter()
        .filter_map(|key| row.get(key))
        .find(|value| !value.is_blank())
}

fn text_field(row: &RawRow, keys: FieldKeys) -> Option<String> {
    match resolve(row, keys)? {
        CellValue::Text(text) => Some(text.trim().to_string()),
        CellValue::Number(n) => Some(format_number(*n)),
        CellValue::Empty => None,
    }
}

/// Coerce obtained marks; absent means 0
///
/// Numbers are truncated toward zero, text must parse as an integer.
pub fn parse_marks(value: Option<&CellValue>) -> Result<i64, MarksError> {
    let marks = match value {
        None | Some(CellValue::Empty) => return Ok(0),
        Some(CellValue::Number(n)) => {
            if !n.is_finite() {
                return Err(MarksError::NotFinite);
            }
            n.trunc() as i64
        }
        Some(CellValue::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(0);
            }
            trimmed
                .parse::<i64>()
                .map_err(|_| MarksError::NotInteger(trimmed.to_string()))?
        }
    };

    if marks < 0 {
        return Err(MarksError::Negative(marks));
    }
    Ok(marks)
}

/// Normalize every row, counting the ones that cannot become a record
///
/// Row numbers in log output are spreadsheet row numbers (header is row 1).
pub fn normalize_rows(rows: &[RawRow]) -> NormalizedRows {
    let mut out = NormalizedRows::default();

    for (index, row) in rows.iter().enumerate() {
        let sheet_row = index + 2;

        let roll_number = text_field(row, ROLL_NUMBER_KEYS);
        let name = text_field(row, NAME_KEYS);
        let father_name = text_field(row, FATHER_NAME_KEYS);

        let (Some(roll_number), Some(name), Some(father_name)) = (roll_number, name, father_name)
        else {
            debug!(row = sheet_row, "Skipping row with missing roll number, name, or father name");
            out.skipped += 1;
            continue;
        };

        let obtained_marks = match parse_marks(resolve(row, MARKS_KEYS)) {
            Ok(marks) => marks,
            Err(e) => {
                warn!(row = sheet_row, roll_number = %roll_number, "Rejecting row: {}", e);
                out.rejected += 1;
                continue;
            }
        };

        out.students.push(NewStudent {
            name,
            father_name,
            roll_number,
            total_marks: DEFAULT_TOTAL_MARKS,
            obtained_marks,
        });
    }

    out
}
