//! Core types for student-records.
//!
//! The record type, the in-memory store and the table formatting hooks. Nothing
//! in here touches the filesystem or the terminal.

pub mod display;
pub mod record;
pub mod store;

// Re-export key types for convenience
pub use display::{Rows, format_header, format_row, format_rule};
pub use record::{FIELD_DELIMITER, StudentRecord, format_marks, validate_marks, validate_name};
pub use store::RecordStore;
