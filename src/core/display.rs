//! Table formatting hooks for presenting records.

use super::record::{StudentRecord, format_marks};

const ROLL_WIDTH: usize = 10;
const NAME_WIDTH: usize = 20;
const MARKS_WIDTH: usize = 10;

/// Column titles, right aligned to the row widths.
pub fn format_header() -> String {
    format!(
        "{:>ROLL_WIDTH$}{:>NAME_WIDTH$}{:>MARKS_WIDTH$}",
        "Roll No", "Name", "Marks"
    )
}

/// Rule printed under the header.
pub fn format_rule() -> String {
    "-".repeat(ROLL_WIDTH + NAME_WIDTH + MARKS_WIDTH)
}

/// One table row for a record.
pub fn format_row(record: &StudentRecord) -> String {
    format!(
        "{:>ROLL_WIDTH$}{:>NAME_WIDTH$}{:>MARKS_WIDTH$}",
        record.roll_no,
        record.name,
        format_marks(record.marks)
    )
}

/// Lazy iterator over formatted rows.
///
/// Cloning gives a fresh pass from the same position, so a caller can walk the
/// rows more than once without touching the collection.
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    inner: std::slice::Iter<'a, StudentRecord>,
}

impl<'a> Rows<'a> {
    pub fn new(records: &'a [StudentRecord]) -> Self {
        Rows {
            inner: records.iter(),
        }
    }
}

impl Iterator for Rows<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next().map(format_row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Rows<'_> {}
