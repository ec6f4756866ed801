//! Flat text storage for student records.
//!
//! One record per line, `<rollNo> <name>,<marks>`, no header.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::{RecordStore, StudentRecord};
use crate::{StoreError, StoreResult};

/// A line that did not parse as a record and was left out of the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source.
    pub line_no: usize,
    pub content: String,
}

/// Outcome of a load: the records plus whatever had to be skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub store: RecordStore,
    pub skipped: Vec<SkippedLine>,
}

/// Reader/writer for the flat text data file.
#[derive(Debug, Clone)]
pub struct TextStore {
    path: PathBuf,
}

impl TextStore {
    /// Create a TextStore for the given path.
    ///
    /// Nothing is touched on disk until [`TextStore::load`] or
    /// [`TextStore::save`] is called.
    pub fn new(path: impl AsRef<Path>) -> Self {
        TextStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every well-formed record from the data file.
    ///
    /// A missing file is an empty store, not an error.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be opened or read.
    pub fn load(&self) -> StoreResult<LoadReport> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "data file not found, starting empty");
                return Ok(LoadReport::default());
            }
            Err(e) => return Err(StoreError::storage("failed to open", &self.path, e)),
        };

        let report = read_records(BufReader::new(file))
            .map_err(|e| StoreError::storage("failed to read", &self.path, e))?;

        for skipped in &report.skipped {
            warn!(
                path = %self.path.display(),
                line = skipped.line_no,
                content = %skipped.content,
                "skipping malformed record line"
            );
        }
        debug!(
            path = %self.path.display(),
            records = report.store.len(),
            skipped = report.skipped.len(),
            "loaded records"
        );
        Ok(report)
    }

    /// Overwrite the data file with `records`.
    ///
    /// The existing file is truncated in place, so its permissions and any
    /// symlink pointing at it are kept.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or any write fails.
    pub fn save(&self, records: &[StudentRecord]) -> StoreResult<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::storage("failed to create directory", parent, e))?;
            }
        }

        for record in records.iter().filter(|r| !r.has_portable_name()) {
            warn!(
                roll_no = record.roll_no,
                name = %record.name,
                "name will not load back unchanged"
            );
        }

        let file = File::create(&self.path)
            .map_err(|e| StoreError::storage("failed to create", &self.path, e))?;
        let mut w = BufWriter::new(file);
        write_records(&mut w, records)
            .and_then(|_| w.flush())
            .map_err(|e| StoreError::storage("failed to write", &self.path, e))?;

        debug!(path = %self.path.display(), records = records.len(), "saved records");
        Ok(())
    }
}

/// Parse records from any buffered reader.
///
/// Blank lines are ignored; other lines that do not parse are reported in
/// [`LoadReport::skipped`].
pub fn read_records<R: BufRead>(reader: R) -> std::io::Result<LoadReport> {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match StudentRecord::parse_line(&line) {
            Some(record) => records.push(record),
            None => skipped.push(SkippedLine {
                line_no: idx + 1,
                content: line,
            }),
        }
    }

    Ok(LoadReport {
        store: RecordStore::from_records(records),
        skipped,
    })
}

/// Write records in the line format to any writer.
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[StudentRecord],
) -> std::io::Result<()> {
    for record in records {
        writeln!(writer, "{}", record.to_line())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_skips_malformed_lines() {
        let input = "1 Alice,88.5\nnot a record\n\n2 Bob,92\n3 Cara,abc\n";
        let report = read_records(input.as_bytes()).unwrap();

        assert_eq!(report.store.len(), 2);
        assert_eq!(report.store.records()[1], StudentRecord::new(2, "Bob", 92.0));
        assert_eq!(
            report.skipped,
            vec![
                SkippedLine {
                    line_no: 2,
                    content: "not a record".to_string()
                },
                SkippedLine {
                    line_no: 5,
                    content: "3 Cara,abc".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_read_handles_crlf() {
        let report = read_records("1 Alice,88.5\r\n2 Bob,92.0\r\n".as_bytes()).unwrap();
        assert_eq!(report.store.len(), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(report.store.records()[0].name, "Alice");
    }

    #[test]
    fn test_write_records_format() {
        let records = vec![
            StudentRecord::new(1, "Alice", 88.5),
            StudentRecord::new(2, "Bob", 92.0),
        ];
        let mut buffer = Vec::new();
        write_records(&mut buffer, &records).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "1 Alice,88.5\n2 Bob,92.0\n");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TextStore::new(dir.path().join("missing.txt"));
        let report = store.load().unwrap();
        assert!(report.store.is_empty());
        assert!(report.skipped.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("students.txt");
        let store = TextStore::new(&path);
        store.save(&[StudentRecord::new(5, "Eve", 61.0)]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "5 Eve,61.0\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.txt");
        std::fs::write(&path, "1 Alice,88.5\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        TextStore::new(&path).save(&[]).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_writes_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real.txt");
        let link = dir.path().join("students.txt");
        std::fs::write(&target, "1 Alice,88.5\n").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        TextStore::new(&link).save(&[StudentRecord::new(2, "Bob", 92.0)]).unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "2 Bob,92.0\n");
    }
}
