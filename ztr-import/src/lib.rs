//! ztr-import library - spreadsheet bulk loader
//!
//! Reads the first worksheet of a spreadsheet, normalizes rows into student
//! records, and inserts them into the students table in fixed-size batches.

use std::fmt;

pub mod batch;
pub mod normalize;
pub mod reader;

use batch::{BatchInserter, BatchTally};
use normalize::normalize_rows;
use reader::RawRow;

/// Final counts for one import run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Data rows read from the worksheet
    pub source_rows: usize,
    /// Records prepared for insert
    pub prepared: usize,
    pub skipped: usize,
    pub rejected: usize,
    pub inserted: usize,
    pub failed: usize,
    /// True when no insert was attempted
    pub dry_run: bool,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Upload Summary ===")?;
        if self.dry_run {
            writeln!(f, "(dry run - nothing was inserted)")?;
        }
        writeln!(f, "Total records in sheet: {}", self.source_rows)?;
        writeln!(f, "Skipped (empty rows): {}", self.skipped)?;
        writeln!(f, "Rejected (invalid marks): {}", self.rejected)?;
        writeln!(f, "Successfully inserted: {}", self.inserted)?;
        write!(f, "Failed: {}", self.failed)
    }
}

/// Normalize rows and insert them
///
/// With no inserter the run is a dry run: rows are normalized and counted
/// but the store is never contacted.
pub async fn import_rows(rows: &[RawRow], inserter: Option<&BatchInserter>) -> ImportSummary {
    let normalized = normalize_rows(rows);

    tracing::info!(
        "Prepared {} students for upload (skipped {} empty rows, rejected {})",
        normalized.students.len(),
        normalized.skipped,
        normalized.rejected
    );

    let tally = match inserter {
        Some(inserter) => inserter.insert_all(&normalized.students).await,
        None => BatchTally::default(),
    };

    ImportSummary {
        source_rows: rows.len(),
        prepared: normalized.students.len(),
        skipped: normalized.skipped,
        rejected: normalized.rejected,
        inserted: tally.inserted,
        failed: tally.failed,
        dry_run: inserter.is_none(),
    }
}
