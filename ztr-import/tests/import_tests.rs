//! End-to-end import tests against an in-memory student store

use std::sync::Arc;
use ztr_common::grading::{Grade, GradeTable};
use ztr_common::store::{MemoryStore, StudentStore};
use ztr_import::batch::{BatchInserter, DEFAULT_BATCH_SIZE};
use ztr_import::import_rows;
use ztr_import::reader::{CellValue, RawRow};

fn sheet_row(roll: &str, name: &str, father: &str, marks: Option<CellValue>) -> RawRow {
    let mut row = RawRow::new();
    row.insert("Roll No.".to_string(), CellValue::Text(roll.to_string()));
    row.insert("Student Name".to_string(), CellValue::Text(name.to_string()));
    row.insert("Father Name".to_string(), CellValue::Text(father.to_string()));
    if let Some(marks) = marks {
        row.insert("Zero Test Marks".to_string(), marks);
    }
    row
}

fn numbered_rows(count: usize) -> Vec<RawRow> {
    (0..count)
        .map(|i| {
            sheet_row(
                &format!("{}", 5000 + i),
                &format!("Student {}", i),
                &format!("Father {}", i),
                Some(CellValue::Number((i % 100) as f64)),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_imported_record_is_retrievable_by_roll_number() {
    let store = Arc::new(MemoryStore::new());
    let inserter = BatchInserter::new(store.clone(), DEFAULT_BATCH_SIZE);

    let rows = vec![sheet_row(
        " 2024-17 ",
        " Maryam Siddiqui ",
        "Kashif Siddiqui",
        Some(CellValue::Text("78".to_string())),
    )];
    let summary = import_rows(&rows, Some(&inserter)).await;
    assert_eq!(summary.inserted, 1);

    let record = store
        .find_by_roll_number("2024-17")
        .await
        .unwrap()
        .expect("imported record should be found");

    assert_eq!(record.name, "Maryam Siddiqui");
    assert_eq!(record.father_name, "Kashif Siddiqui");
    assert_eq!(record.roll_number, "2024-17");
    assert_eq!(record.total_marks, 100);
    assert_eq!(record.obtained_marks, 78);

    let grade = GradeTable::default()
        .evaluate(record.obtained_marks, record.total_marks)
        .unwrap();
    assert_eq!(grade.grade, Grade::B);
}

#[tokio::test]
async fn test_partial_failure_tally() {
    let store = Arc::new(MemoryStore::new());
    store.fail_insert_call(2).await;
    let inserter = BatchInserter::new(store.clone(), DEFAULT_BATCH_SIZE);

    let summary = import_rows(&numbered_rows(120), Some(&inserter)).await;

    assert_eq!(store.insert_calls().await, vec![50, 50, 20]);
    assert_eq!(summary.source_rows, 120);
    assert_eq!(summary.prepared, 120);
    assert_eq!(summary.inserted, 70);
    assert_eq!(summary.failed, 50);

    // Records from the failed batch are absent, the rest are present
    assert!(store.find_by_roll_number("5049").await.unwrap().is_some());
    assert!(store.find_by_roll_number("5050").await.unwrap().is_none());
    assert!(store.find_by_roll_number("5100").await.unwrap().is_some());
}

#[tokio::test]
async fn test_skipped_and_rejected_rows_are_reported() {
    let store = Arc::new(MemoryStore::new());
    let inserter = BatchInserter::new(store.clone(), DEFAULT_BATCH_SIZE);

    let mut title_row = RawRow::new();
    title_row.insert(
        "__EMPTY".to_string(),
        CellValue::Text("Zero Test Result Sheet".to_string()),
    );

    let rows = vec![
        title_row,
        sheet_row("1", "Good", "Row", Some(CellValue::Number(91.0))),
        sheet_row("2", "Bad", "Marks", Some(CellValue::Text("AB".to_string()))),
        sheet_row("3", "No", "Marks", None),
    ];

    let summary = import_rows(&rows, Some(&inserter)).await;

    assert_eq!(summary.source_rows, 4);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(
        store
            .find_by_roll_number("3")
            .await
            .unwrap()
            .unwrap()
            .obtained_marks,
        0
    );
}

#[tokio::test]
async fn test_dry_run_never_inserts() {
    let summary = import_rows(&numbered_rows(3), None).await;

    assert!(summary.dry_run);
    assert_eq!(summary.prepared, 3);
    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.failed, 0);
}

#[test]
fn test_summary_output() {
    let summary = ztr_import::ImportSummary {
        source_rows: 130,
        prepared: 120,
        skipped: 8,
        rejected: 2,
        inserted: 70,
        failed: 50,
        dry_run: false,
    };

    let text = summary.to_string();
    assert!(text.starts_with("=== Upload Summary ==="));
    assert!(text.contains("Total records in sheet: 130"));
    assert!(text.contains("Skipped (empty rows): 8"));
    assert!(text.contains("Rejected (invalid marks): 2"));
    assert!(text.contains("Successfully inserted: 70"));
    assert!(text.contains("Failed: 50"));
    assert!(!text.contains("dry run"));
}
