//! Storage layer for student records.
//!
//! The flat text data file the store is loaded from and saved to, and the CSV
//! export.

pub mod csv;
pub mod text;

// Re-export key types
pub use csv::{CSV_HEADERS, CsvExporter, CsvStyle};
pub use text::{LoadReport, SkippedLine, TextStore, read_records, write_records};
