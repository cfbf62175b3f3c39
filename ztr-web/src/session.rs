//! Lookup page state machine
//!
//! `idle -> searching -> (found | not-found | network-error)`, with an inline
//! `invalid` state for empty submissions. Every submission is tagged with a
//! monotonically increasing token; a result whose token is not the latest one
//! issued is discarded, so a slow earlier query can never overwrite a newer one.

use tracing::{debug, error, warn};
use ztr_common::grading::{GradeInfo, GradeTable};
use ztr_common::store::{StoreError, StudentStore};
use ztr_common::StudentRecord;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a roll number";
pub const NOT_FOUND_MESSAGE: &str = "No result found for this roll number";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Current state of the lookup page
#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Idle,
    Invalid,
    Searching { token: u64 },
    Found {
        student: StudentRecord,
        grade: GradeInfo,
    },
    NotFound,
    NetworkError,
}

impl LookupState {
    /// Short machine-readable name used by the JSON API
    pub fn name(&self) -> &'static str {
        match self {
            LookupState::Idle => "idle",
            LookupState::Invalid => "invalid",
            LookupState::Searching { .. } => "searching",
            LookupState::Found { .. } => "found",
            LookupState::NotFound => "not_found",
            LookupState::NetworkError => "network_error",
        }
    }

    /// User-facing message for error states
    pub fn message(&self) -> Option<&'static str> {
        match self {
            LookupState::Invalid => Some(EMPTY_INPUT_MESSAGE),
            LookupState::NotFound => Some(NOT_FOUND_MESSAGE),
            LookupState::NetworkError => Some(NETWORK_ERROR_MESSAGE),
            _ => None,
        }
    }
}

/// Handle for one issued query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    token: u64,
    roll_number: String,
}

impl SearchTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Trimmed roll number to query for
    pub fn roll_number(&self) -> &str {
        &self.roll_number
    }
}

/// One visitor's view of the lookup page
#[derive(Debug, Clone)]
pub struct LookupSession {
    input: String,
    state: LookupState,
    latest_token: u64,
}

impl Default for LookupSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupSession {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            state: LookupState::Idle,
            latest_token: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// True when the rendered result should play the celebration animation
    pub fn celebrate(&self) -> bool {
        matches!(&self.state, LookupState::Found { grade, .. } if grade.show_confetti)
    }

    /// Replace the input text
    ///
    /// Clears any previous result or error so a stale result never sits next
    /// to a half-typed query. An in-flight search stays in flight.
    pub fn edit_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
        if !matches!(self.state, LookupState::Searching { .. }) {
            self.state = LookupState::Idle;
        }
    }

    /// Submit the current input
    ///
    /// Returns `None` (and enters `Invalid`) for blank input; no query may be
    /// issued in that case. Otherwise enters `Searching` with a fresh token.
    /// Either way the token advances, so any search still in flight is stale.
    pub fn submit(&mut self) -> Option<SearchTicket> {
        self.latest_token += 1;

        let roll_number = self.input.trim();
        if roll_number.is_empty() {
            self.state = LookupState::Invalid;
            return None;
        }

        self.state = LookupState::Searching {
            token: self.latest_token,
        };

        Some(SearchTicket {
            token: self.latest_token,
            roll_number: roll_number.to_string(),
        })
    }

    /// Apply a query result
    ///
    /// Returns false when the ticket is stale and the result was discarded.
    pub fn resolve(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Option<StudentRecord>, StoreError>,
        grades: &GradeTable,
    ) -> bool {
        if ticket.token != self.latest_token {
            debug!(
                token = ticket.token,
                latest = self.latest_token,
                "Discarding stale lookup result"
            );
            return false;
        }

        self.state = match result {
            Ok(Some(student)) => {
                match grades.evaluate(student.obtained_marks, student.total_marks) {
                    Ok(grade) => LookupState::Found { student, grade },
                    Err(e) => {
                        warn!(roll_number = %student.roll_number, "Record cannot be graded: {}", e);
                        LookupState::NotFound
                    }
                }
            }
            Ok(None) => LookupState::NotFound,
            Err(e) if e.is_transport() => {
                error!(roll_number = %ticket.roll_number, "Search error: {}", e);
                LookupState::NetworkError
            }
            Err(e) => {
                warn!(roll_number = %ticket.roll_number, "Lookup query failed: {}", e);
                LookupState::NotFound
            }
        };

        true
    }

    /// Submit and run the query against `store` in one step
    pub async fn search(&mut self, store: &dyn StudentStore, grades: &GradeTable) {
        if let Some(ticket) = self.submit() {
            let result = store.find_by_roll_number(ticket.roll_number()).await;
            self.resolve(&ticket, result, grades);
        }
    }
}
