//! Read-only commands: list, topper, average, sort, search, summary.
//!
//! Each command loads the data file, runs one store operation and renders the
//! result to `out`.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::core::{RecordStore, StudentRecord, format_header, format_row, format_rule};
use crate::storage::{LoadReport, TextStore};
use crate::{StoreConfig, StoreResult, SummaryReport, write_json};

pub const NO_MATCH_MESSAGE: &str = "No matching student found.";

/// Open the configured data file and load it.
pub fn load(config: &StoreConfig) -> StoreResult<(TextStore, LoadReport)> {
    let text = TextStore::new(&config.data_file);
    let report = text.load()?;
    if !report.skipped.is_empty() {
        info!(
            skipped = report.skipped.len(),
            "some lines in {} were not records",
            config.data_file.display()
        );
    }
    Ok((text, report))
}

/// Header, rule and one line per row.
pub fn write_table<W, I>(out: &mut W, rows: I) -> StoreResult<()>
where
    W: Write,
    I: IntoIterator<Item = String>,
{
    writeln!(out, "{}", format_header())?;
    writeln!(out, "{}", format_rule())?;
    for row in rows {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

pub fn write_average<W: Write>(out: &mut W, average: f64) -> StoreResult<()> {
    writeln!(out, "Average Marks: {average:.2}")?;
    Ok(())
}

pub fn list<W: Write>(config: &StoreConfig, out: &mut W, json: Option<&Path>) -> StoreResult<()> {
    let (_, report) = load(config)?;
    write_table(out, report.store.display_all())?;
    if let Some(path) = json {
        write_json(path, report.store.records())?;
    }
    Ok(())
}

pub fn topper<W: Write>(config: &StoreConfig, out: &mut W, json: Option<&Path>) -> StoreResult<()> {
    let (_, report) = load(config)?;
    let top = report.store.topper()?;
    writeln!(out, "Topper:")?;
    write_table(out, std::iter::once(format_row(top)))?;
    if let Some(path) = json {
        write_json(path, top)?;
    }
    Ok(())
}

pub fn average<W: Write>(config: &StoreConfig, out: &mut W) -> StoreResult<()> {
    let (_, report) = load(config)?;
    write_average(out, report.store.average()?)
}

/// Sort descending by marks and print. The file is rewritten only with `save`.
pub fn sort<W: Write>(config: &StoreConfig, out: &mut W, save: bool) -> StoreResult<()> {
    let (text, report) = load(config)?;
    let mut store = report.store;
    store.sort_by_marks_desc();
    write_table(out, store.display_all())?;
    if save {
        text.save(store.records())?;
        info!(path = %text.path().display(), "saved sorted records");
    }
    Ok(())
}

pub fn search<W: Write>(
    config: &StoreConfig,
    out: &mut W,
    query: &str,
    ignore_case: bool,
    json: Option<&Path>,
) -> StoreResult<()> {
    let (_, report) = load(config)?;
    let matches = find(&report.store, query, ignore_case);
    write_matches(out, &matches)?;
    if let Some(path) = json {
        write_json(path, &matches)?;
    }
    Ok(())
}

pub(crate) fn find<'a>(
    store: &'a RecordStore,
    query: &str,
    ignore_case: bool,
) -> Vec<&'a StudentRecord> {
    if ignore_case {
        store.search_by_name_ignore_case(query)
    } else {
        store.search_by_name(query)
    }
}

pub(crate) fn write_matches<W: Write>(out: &mut W, matches: &[&StudentRecord]) -> StoreResult<()> {
    if matches.is_empty() {
        writeln!(out, "{NO_MATCH_MESSAGE}")?;
        return Ok(());
    }
    write_table(out, matches.iter().map(|r| format_row(r)))
}

/// Count, average and topper in one go. Empty stores are not an error here.
pub fn summary<W: Write>(
    config: &StoreConfig,
    out: &mut W,
    json: Option<&Path>,
) -> StoreResult<()> {
    let (_, report) = load(config)?;
    let summary = SummaryReport::from_store(&config.data_file, &report.store, report.skipped.len());

    writeln!(out, "Records: {}", summary.count)?;
    if summary.skipped_lines > 0 {
        writeln!(out, "Skipped lines: {}", summary.skipped_lines)?;
    }
    match summary.average {
        Some(avg) => write_average(out, avg)?,
        None => writeln!(out, "Average Marks: n/a")?,
    }
    if let Some(top) = &summary.topper {
        writeln!(out, "Topper: {} ({})", top.name.trim(), top.roll_no)?;
    }

    if let Some(path) = json {
        write_json(path, &summary)?;
    }
    Ok(())
}
