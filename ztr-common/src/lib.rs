//! # ZTR Common Library
//!
//! Shared code for the Zero Test Result services including:
//! - Student record models
//! - Grade evaluation over a configurable band table
//! - Student store abstraction (PostgREST client, in-memory fake)
//! - Configuration loading

pub mod config;
pub mod error;
pub mod grading;
pub mod models;
pub mod store;

pub use error::{Error, Result};
pub use grading::{Grade, GradeInfo, GradeTable};
pub use models::{NewStudent, StudentRecord};
pub use store::{StoreError, StudentStore};
