//! Chunked inserts
//!
//! Writes records to the store in fixed-size batches, one request at a time.
//! A failed batch is logged and counted; the run moves on to the next batch.
//! Nothing is retried or rolled back.

use std::sync::Arc;
use tracing::{error, info};
use ztr_common::store::StudentStore;
use ztr_common::NewStudent;

pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Insert counts for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchTally {
    /// Insert requests issued
    pub batches: usize,
    /// Rows the store returned as inserted
    pub inserted: usize,
    /// Rows in batches the store refused
    pub failed: usize,
}

/// Sequential batch writer
pub struct BatchInserter {
    store: Arc<dyn StudentStore>,
    batch_size: usize,
}

impl BatchInserter {
    /// A batch size of 0 is treated as 1
    pub fn new(store: Arc<dyn StudentStore>, batch_size: usize) -> Self {
        Self {
            store,
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Insert all records, one batch at a time
    pub async fn insert_all(&self, students: &[NewStudent]) -> BatchTally {
        let mut tally = BatchTally::default();

        for (index, batch) in students.chunks(self.batch_size).enumerate() {
            let number = index + 1;
            tally.batches += 1;

            match self.store.insert_batch(batch).await {
                Ok(rows) => {
                    // Count what the store confirmed, not what was sent
                    tally.inserted += rows.len();
                    info!("Inserted batch {}: {} students", number, rows.len());
                }
                Err(e) => {
                    tally.failed += batch.len();
                    error!("Error inserting batch {}: {}", number, e);
                }
            }
        }

        tally
    }
}
