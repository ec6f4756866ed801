//! CSV export for student records.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{StudentRecord, format_marks};
use crate::{StoreError, StoreResult};

/// CSV column headers in export order.
pub const CSV_HEADERS: &[&str] = &["Roll No", "Name", "Marks"];

/// How fields are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvStyle {
    /// Fields written as-is. A comma inside a name shifts the columns.
    #[default]
    Plain,
    /// Fields quoted when they contain a delimiter, quote or line break.
    Quoted,
}

/// CSV exporter for student records.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    style: CsvStyle,
}

impl CsvExporter {
    /// Create a new CsvExporter with the plain style.
    pub fn new() -> Self {
        CsvExporter::default()
    }

    pub fn with_style(style: CsvStyle) -> Self {
        CsvExporter { style }
    }

    /// Export records to a CSV file, replacing any existing content.
    ///
    /// # Errors
    /// Returns an error if file operations or CSV writing fails.
    pub fn export(&self, records: &[StudentRecord], output: &Path) -> StoreResult<()> {
        // Ensure parent directory exists
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::storage("failed to create directory", parent, e))?;
            }
        }

        let file = std::fs::File::create(output)
            .map_err(|e| StoreError::storage("failed to create", output, e))?;

        self.export_to_writer(records, file)?;
        debug!(
            path = %output.display(),
            records = records.len(),
            style = ?self.style,
            "exported CSV"
        );
        Ok(())
    }

    /// Export records to any writer implementing Write.
    ///
    /// # Errors
    /// Returns an error if CSV writing fails.
    pub fn export_to_writer<W: Write>(
        &self,
        records: &[StudentRecord],
        writer: W,
    ) -> StoreResult<()> {
        let quote_style = match self.style {
            CsvStyle::Plain => csv::QuoteStyle::Never,
            CsvStyle::Quoted => csv::QuoteStyle::Necessary,
        };
        let mut csv_writer = csv::WriterBuilder::new()
            .quote_style(quote_style)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        csv_writer.write_record(CSV_HEADERS)?;
        for record in records {
            csv_writer.write_record(record_to_row(record))?;
        }

        csv_writer
            .flush()
            .map_err(|e| StoreError::Message(format!("failed to flush CSV writer: {e}")))?;

        Ok(())
    }
}

/// Convert a record to a row of CSV values.
fn record_to_row(record: &StudentRecord) -> [String; 3] {
    [
        record.roll_no.to_string(),
        record.name.clone(),
        format_marks(record.marks),
    ]
}
