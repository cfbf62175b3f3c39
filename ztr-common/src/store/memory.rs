//! In-memory student store
//!
//! Stand-in for the hosted table in tests. Records get
//! sequential identifiers starting at 1. Individual insert calls or all
//! lookups can be made to fail to exercise error paths.

use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;

use super::{StoreError, StudentStore};
use crate::models::{NewStudent, StudentRecord};

#[derive(Default)]
struct Inner {
    records: Vec<StudentRecord>,
    next_id: i64,
    lookup_calls: usize,
    insert_calls: Vec<usize>,
    failing_inserts: HashSet<usize>,
    lookup_failure: Option<StoreError>,
}

/// Student store backed by a `Vec`
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with records (identifiers assigned on insert)
    pub async fn with_students(students: Vec<NewStudent>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock().await;
            for student in students {
                inner.next_id += 1;
                let id = inner.next_id;
                inner.records.push(student.into_record(id));
            }
        }
        store
    }

    /// Make the nth insert call (1-based) fail with an API error
    pub async fn fail_insert_call(&self, call: usize) {
        self.inner.lock().await.failing_inserts.insert(call);
    }

    /// Make every lookup fail with the given error
    pub async fn fail_lookups(&self, error: StoreError) {
        self.inner.lock().await.lookup_failure = Some(error);
    }

    /// Number of lookups issued so far
    pub async fn lookup_calls(&self) -> usize {
        self.inner.lock().await.lookup_calls
    }

    /// Batch sizes of every insert call issued so far, in order
    pub async fn insert_calls(&self) -> Vec<usize> {
        self.inner.lock().await.insert_calls.clone()
    }

    pub async fn records(&self) -> Vec<StudentRecord> {
        self.inner.lock().await.records.clone()
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn find_by_roll_number(
        &self,
        roll_number: &str,
    ) -> Result<Option<StudentRecord>, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.lookup_calls += 1;

        if let Some(error) = &inner.lookup_failure {
            return Err(error.clone());
        }

        let mut matches = inner
            .records
            .iter()
            .filter(|record| record.roll_number == roll_number);

        match (matches.next(), matches.next()) {
            (Some(record), None) => Ok(Some(record.clone())),
            _ => Ok(None),
        }
    }

    async fn insert_batch(&self, students: &[NewStudent]) -> Result<Vec<StudentRecord>, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.insert_calls.push(students.len());
        let call = inner.insert_calls.len();

        if inner.failing_inserts.contains(&call) {
            return Err(StoreError::Api {
                status: 500,
                message: format!("insert call {} rejected", call),
            });
        }

        let mut inserted = Vec::with_capacity(students.len());
        for student in students {
            inner.next_id += 1;
            let record = student.clone().into_record(inner.next_id);
            inner.records.push(record.clone());
            inserted.push(record);
        }

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(roll: &str) -> NewStudent {
        NewStudent {
            name: "Ali".to_string(),
            father_name: "Ahmed".to_string(),
            roll_number: roll.to_string(),
            total_marks: 100,
            obtained_marks: 50,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let inserted = store
            .insert_batch(&[student("1"), student("2")])
            .await
            .unwrap();

        assert_eq!(inserted.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(store.insert_calls().await, vec![2]);
    }

    #[tokio::test]
    async fn test_lookup_exact_match_only() {
        let store = MemoryStore::with_students(vec![student("101")]).await;

        assert!(store.find_by_roll_number("101").await.unwrap().is_some());
        assert!(store.find_by_roll_number("10").await.unwrap().is_none());
        assert!(store.find_by_roll_number(" 101").await.unwrap().is_none());
        assert_eq!(store.lookup_calls().await, 3);
    }

    #[tokio::test]
    async fn test_duplicate_roll_numbers_are_not_resolved() {
        let store = MemoryStore::with_students(vec![student("7"), student("7")]).await;
        assert_eq!(store.find_by_roll_number("7").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_injected_insert_failure() {
        let store = MemoryStore::new();
        store.fail_insert_call(2).await;

        assert!(store.insert_batch(&[student("1")]).await.is_ok());
        assert!(matches!(
            store.insert_batch(&[student("2")]).await,
            Err(StoreError::Api { status: 500, .. })
        ));
        assert_eq!(store.records().await.len(), 1);
    }
}
