//! Interactive numbered menu over a loaded store.
//!
//! The session reads choices and field values from any `BufRead` and renders
//! to any `Write`, so the same loop serves the terminal and tests. Mutations
//! (add/remove) are saved to the data file immediately; sorting only changes
//! the in-memory order until the next save.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::Context;
use tracing::{debug, info};

use crate::core::{RecordStore, format_row, validate_marks, validate_name};
use crate::export_cmd::export_records;
use crate::query_cmd::{find, load, write_average, write_matches, write_table};
use crate::storage::TextStore;
use crate::{StoreConfig, StoreError, StoreResult};

const MENU: &str = "\
--- Student Record Analyzer ---
1. Display All Records
2. Display Topper
3. Display Average Marks
4. Sort by Marks (Descending)
5. Search by Name
6. Export to CSV
7. Add New Record
8. Remove Record by Roll No
0. Exit";

/// Run the menu on the process's stdin/stdout.
pub fn run(config: &StoreConfig) -> StoreResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(config, stdin.lock(), stdout.lock())
}

pub fn run_with<R: BufRead, W: Write>(config: &StoreConfig, input: R, out: W) -> StoreResult<()> {
    let (text, report) = load(config)?;
    let mut session = Session {
        config,
        text,
        store: report.store,
        input,
        out,
    };
    session.run()
}

struct Session<'a, R, W> {
    config: &'a StoreConfig,
    text: TextStore,
    store: RecordStore,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    fn run(&mut self) -> StoreResult<()> {
        loop {
            writeln!(self.out, "\n{MENU}")?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                writeln!(self.out)?;
                break;
            };

            let result = match choice.trim().parse::<u8>() {
                Ok(0) => {
                    writeln!(self.out, "Exiting...")?;
                    break;
                }
                Ok(1) => self.display_all(),
                Ok(2) => self.topper(),
                Ok(3) => self.average(),
                Ok(4) => {
                    self.store.sort_by_marks_desc();
                    self.display_all()
                }
                Ok(5) => self.search(),
                Ok(6) => self.export(),
                Ok(7) => self.add(),
                Ok(8) => self.remove(),
                _ => {
                    writeln!(self.out, "Invalid choice!")?;
                    Ok(())
                }
            };

            match result {
                Ok(()) => {}
                Err(StoreError::Output(e)) => return Err(StoreError::Output(e)),
                Err(e) => {
                    debug!(error = %e, "menu action failed");
                    writeln!(self.out, "Error: {e:#}")?;
                }
            }
        }
        Ok(())
    }

    fn display_all(&mut self) -> StoreResult<()> {
        write_table(&mut self.out, self.store.display_all())
    }

    fn topper(&mut self) -> StoreResult<()> {
        let row = format_row(self.store.topper()?);
        writeln!(self.out, "\nTopper:")?;
        write_table(&mut self.out, std::iter::once(row))
    }

    fn average(&mut self) -> StoreResult<()> {
        let average = self.store.average()?;
        writeln!(self.out)?;
        write_average(&mut self.out, average)
    }

    fn search(&mut self) -> StoreResult<()> {
        let Some(query) = self.prompt("Enter name to search: ")? else {
            return Ok(());
        };
        let matches = find(&self.store, &query, false);
        write_matches(&mut self.out, &matches)
    }

    fn export(&mut self) -> StoreResult<()> {
        export_records(
            self.config,
            &mut self.out,
            self.store.records(),
            &self.config.export_file,
        )
    }

    fn add(&mut self) -> StoreResult<()> {
        let Some(roll_no) = self.prompt_parse::<i64>("Enter Roll No: ", "roll number")? else {
            return Ok(());
        };
        let Some(name) = self.prompt("Enter Name: ")? else {
            return Ok(());
        };
        validate_name(&name)?;
        let Some(marks) = self.prompt_parse::<f64>("Enter Marks: ", "marks")? else {
            return Ok(());
        };
        validate_marks(marks)?;

        self.store.add(roll_no, name, marks);
        self.text.save(self.store.records())?;
        info!(roll_no, "student added");
        writeln!(self.out, "Student added.")?;
        Ok(())
    }

    fn remove(&mut self) -> StoreResult<()> {
        let prompt = "Enter Roll No to remove: ";
        let Some(roll_no) = self.prompt_parse::<i64>(prompt, "roll number")? else {
            return Ok(());
        };
        if self.store.remove(roll_no) == 0 {
            writeln!(self.out, "Roll No not found.")?;
            return Ok(());
        }
        self.text.save(self.store.records())?;
        info!(roll_no, "student removed");
        writeln!(self.out, "Student removed.")?;
        Ok(())
    }

    /// Print `message` and read one line without its line ending.
    /// `None` at end of input.
    fn prompt(&mut self, message: &str) -> StoreResult<Option<String>> {
        write!(self.out, "{message}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt_parse<T>(&mut self, message: &str, what: &str) -> StoreResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let Some(line) = self.prompt(message)? else {
            return Ok(None);
        };
        let value = line
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid {what}: {:?}", line.trim()))?;
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_output(cfg: &StoreConfig, input: &str) -> String {
        let mut out = Vec::new();
        run_with(cfg, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn config_in(dir: &tempfile::TempDir) -> StoreConfig {
        StoreConfig::default().with_overrides(
            Some(dir.path().join("students.txt")),
            Some(dir.path().join("exported.csv")),
        )
    }

    #[test]
    fn test_exit_and_invalid_choice() {
        let dir = tempfile::tempdir().unwrap();
        let out = session_output(&config_in(&dir), "9\nabc\n0\n");
        assert_eq!(out.matches("Invalid choice!").count(), 2);
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let dir = tempfile::tempdir().unwrap();
        let out = session_output(&config_in(&dir), "");
        assert!(out.contains("--- Student Record Analyzer ---"));
    }

    #[test]
    fn test_topper_on_empty_reports_error_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let out = session_output(&config_in(&dir), "2\n3\n0\n");
        assert_eq!(out.matches("Error: no student records").count(), 2);
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_bad_roll_number_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let out = session_output(&config_in(&dir), "7\nx1\n0\n");
        assert!(out.contains("Error: invalid roll number: \"x1\""));
    }

    #[test]
    fn test_nan_marks_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(&dir);
        let out = session_output(&cfg, "7\n1\nAl\nNaN\n0\n");
        assert!(out.contains("Error: invalid marks: NaN"));
        assert!(!cfg.data_file.exists());
    }
}
