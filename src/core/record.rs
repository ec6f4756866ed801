//! Student record type and the single-line text format it is persisted in.

use serde::{Deserialize, Serialize};

use crate::{StoreError, StoreResult};

/// Separator between the name and the marks in a persisted line.
pub const FIELD_DELIMITER: char = ',';

/// One student: roll number, name and score.
///
/// Roll numbers are not unique; the store keeps whatever it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub roll_no: i64,
    pub name: String,
    pub marks: f64,
}

impl StudentRecord {
    pub fn new(roll_no: i64, name: impl Into<String>, marks: f64) -> Self {
        StudentRecord {
            roll_no,
            name: name.into(),
            marks,
        }
    }

    /// Parse a persisted line of the form `<rollNo> <name>,<marks>`.
    ///
    /// Returns `None` when the line does not have that shape. The name is kept
    /// verbatim (spaces included) and may be empty; the marks must be a finite
    /// number.
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.trim_start();

        let digits_end = rest
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let roll_no: i64 = rest[..digits_end].parse().ok()?;

        let rest = rest[digits_end..].trim_start();
        let (name, marks) = rest.split_once(FIELD_DELIMITER)?;

        let marks: f64 = marks.trim().parse().ok()?;
        if !marks.is_finite() {
            return None;
        }

        Some(StudentRecord::new(roll_no, name, marks))
    }

    /// Render the record as a persisted line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{} {}{}{}",
            self.roll_no,
            self.name,
            FIELD_DELIMITER,
            format_marks(self.marks)
        )
    }

    /// True when the name survives a save/load cycle unchanged.
    pub fn has_portable_name(&self) -> bool {
        validate_name(&self.name).is_ok()
    }
}

/// Check that a name can be stored in the line format.
///
/// The delimiter would split the name on reload, a line break would split the
/// record, and leading whitespace is absorbed into the roll number separator.
pub fn validate_name(name: &str) -> StoreResult<()> {
    if name.contains(FIELD_DELIMITER) {
        return Err(StoreError::InvalidName(format!(
            "name must not contain '{FIELD_DELIMITER}': {name:?}"
        )));
    }
    if name.contains(['\n', '\r']) {
        return Err(StoreError::InvalidName(format!(
            "name must not contain a line break: {name:?}"
        )));
    }
    if name.starts_with(char::is_whitespace) {
        return Err(StoreError::InvalidName(format!(
            "name must not start with whitespace: {name:?}"
        )));
    }
    Ok(())
}

/// Check that marks can be stored and read back. `NaN` and infinities are not
/// accepted by [`StudentRecord::parse_line`].
pub fn validate_marks(marks: f64) -> StoreResult<()> {
    if !marks.is_finite() {
        return Err(StoreError::InvalidMarks(marks));
    }
    Ok(())
}

/// Format marks for files and tables.
///
/// Whole numbers keep one decimal (`92.0`), anything else uses the shortest
/// representation that parses back to the same value (`88.5`).
pub fn format_marks(marks: f64) -> String {
    if marks.is_finite() && marks.fract() == 0.0 && marks.abs() < 1e15 {
        format!("{marks:.1}")
    } else {
        format!("{marks}")
    }
}
