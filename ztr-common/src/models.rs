//! Student record models
//!
//! Mirrors the hosted `students` table:
//! `id, name, father_name, roll_number, total_marks, obtained_marks`.

use serde::{Deserialize, Serialize};

/// Name of the hosted table holding student results
pub const STUDENTS_TABLE: &str = "students";

/// Column list used by lookups
pub const STUDENT_COLUMNS: &str = "id,name,father_name,roll_number,total_marks,obtained_marks";

/// Total marks assigned to every imported record
pub const DEFAULT_TOTAL_MARKS: i64 = 100;

/// A persisted student result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Store-assigned identifier
    pub id: i64,
    pub name: String,
    pub father_name: String,
    /// Lookup key, expected unique
    pub roll_number: String,
    pub total_marks: i64,
    pub obtained_marks: i64,
}

/// Insert payload for a student row (no identifier yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub father_name: String,
    pub roll_number: String,
    pub total_marks: i64,
    pub obtained_marks: i64,
}

impl NewStudent {
    /// Attach a store-assigned identifier
    pub fn into_record(self, id: i64) -> StudentRecord {
        StudentRecord {
            id,
            name: self.name,
            father_name: self.father_name,
            roll_number: self.roll_number,
            total_marks: self.total_marks,
            obtained_marks: self.obtained_marks,
        }
    }
}
