//! In-memory record collection and the queries and mutations over it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::display::Rows;
use super::record::StudentRecord;
use crate::{StoreError, StoreResult};

/// Ordered collection of student records.
///
/// Order is insertion order until [`RecordStore::sort_by_marks_desc`] is
/// called. Persistence is the caller's job; see [`crate::storage`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        RecordStore::default()
    }

    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        RecordStore { records }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Formatted table rows in current order.
    pub fn display_all(&self) -> Rows<'_> {
        Rows::new(&self.records)
    }

    /// Record with the highest marks. Ties go to the earliest record.
    pub fn topper(&self) -> StoreResult<&StudentRecord> {
        let mut iter = self.records.iter();
        let first = iter.next().ok_or(StoreError::EmptyCollection {
            operation: "topper",
        })?;
        Ok(iter.fold(first, |best, r| {
            if r.marks.total_cmp(&best.marks) == Ordering::Greater {
                r
            } else {
                best
            }
        }))
    }

    /// Arithmetic mean of all marks.
    pub fn average(&self) -> StoreResult<f64> {
        if self.records.is_empty() {
            return Err(StoreError::EmptyCollection {
                operation: "average",
            });
        }
        let total: f64 = self.records.iter().map(|r| r.marks).sum();
        Ok(total / self.records.len() as f64)
    }

    /// Sort in place, highest marks first.
    pub fn sort_by_marks_desc(&mut self) {
        self.records.sort_by(|a, b| b.marks.total_cmp(&a.marks));
    }

    /// Records whose name contains `query` (case-sensitive), in current order.
    ///
    /// An empty result means nothing matched.
    pub fn search_by_name(&self, query: &str) -> Vec<&StudentRecord> {
        self.records
            .iter()
            .filter(|r| r.name.contains(query))
            .collect()
    }

    /// Like [`RecordStore::search_by_name`] but ignoring case.
    pub fn search_by_name_ignore_case(&self, query: &str) -> Vec<&StudentRecord> {
        let query = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Append a record. Values are expected to be validated by the caller.
    pub fn add(&mut self, roll_no: i64, name: impl Into<String>, marks: f64) {
        let record = StudentRecord::new(roll_no, name, marks);
        debug!(roll_no, name = %record.name, marks, "adding record");
        self.records.push(record);
    }

    /// Remove every record with this roll number and return how many went.
    pub fn remove(&mut self, roll_no: i64) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.roll_no != roll_no);
        let removed = before - self.records.len();
        debug!(roll_no, removed, "removed records");
        removed
    }
}
