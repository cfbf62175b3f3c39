//! Student store abstraction
//!
//! The hosted `students` table is reached through [`StudentStore`]. Binaries
//! build one [`PostgrestStore`] at startup and hand it to the lookup and
//! import flows as `Arc<dyn StudentStore>`; tests substitute [`MemoryStore`].

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewStudent, StudentRecord};

mod memory;
mod postgrest;

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

/// Store access errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// Request never produced a response (DNS, connect, TLS, reset)
    #[error("Network error: {0}")]
    Transport(String),

    /// Store answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl StoreError {
    /// True when the failure happened below the HTTP layer
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::Transport(_))
    }
}

/// Read/insert access to student records
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Fetch the record whose roll number matches exactly
    ///
    /// # Returns
    /// * `Ok(Some(record))` - exactly one match
    /// * `Ok(None)` - no match (or an ambiguous match the store refused to pick from)
    /// * `Err(_)` - request failed
    async fn find_by_roll_number(&self, roll_number: &str)
        -> Result<Option<StudentRecord>, StoreError>;

    /// Insert a batch of records and return the rows the store accepted
    async fn insert_batch(&self, students: &[NewStudent]) -> Result<Vec<StudentRecord>, StoreError>;
}
