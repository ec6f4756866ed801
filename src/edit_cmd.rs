//! Mutating commands. Each one loads, applies a single change and saves.

use std::io::Write;

use tracing::info;

use crate::core::{validate_marks, validate_name};
use crate::query_cmd::load;
use crate::{StoreConfig, StoreResult};

pub const ADDED_MESSAGE: &str = "Student added.";
pub const REMOVED_MESSAGE: &str = "Student removed.";
pub const NOT_FOUND_MESSAGE: &str = "Roll No not found.";

/// Append a record and save. Names or marks that would not load back are
/// rejected before the data file is read.
pub fn add<W: Write>(
    config: &StoreConfig,
    out: &mut W,
    roll_no: i64,
    name: &str,
    marks: f64,
) -> StoreResult<()> {
    validate_name(name)?;
    validate_marks(marks)?;
    let (text, report) = load(config)?;
    let mut store = report.store;
    store.add(roll_no, name, marks);
    text.save(store.records())?;
    info!(roll_no, path = %text.path().display(), "student added");
    writeln!(out, "{ADDED_MESSAGE}")?;
    Ok(())
}

/// Remove all records with `roll_no`. The file is only rewritten when
/// something was removed.
pub fn remove<W: Write>(config: &StoreConfig, out: &mut W, roll_no: i64) -> StoreResult<usize> {
    let (text, report) = load(config)?;
    let mut store = report.store;
    let removed = store.remove(roll_no);
    if removed == 0 {
        writeln!(out, "{NOT_FOUND_MESSAGE}")?;
        return Ok(0);
    }
    text.save(store.records())?;
    info!(roll_no, removed, path = %text.path().display(), "students removed");
    writeln!(out, "{REMOVED_MESSAGE}")?;
    Ok(removed)
}
