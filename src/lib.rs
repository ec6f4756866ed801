pub mod config;
pub mod core;
pub mod storage;

pub mod edit_cmd;
pub mod export_cmd;
pub mod menu_cmd;
pub mod query_cmd;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::core::{RecordStore, StudentRecord};
pub use config::StoreConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Topper or average asked of a store with no records.
    #[error("no student records: cannot compute {operation}")]
    EmptyCollection { operation: &'static str },
    /// Reading or writing a data or export file failed.
    #[error("{action} {}: {source}", .path.display())]
    Storage {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing results to the console or another output stream failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("invalid marks: {0} (must be a finite number)")]
    InvalidMarks(f64),
    #[error("config error: {0}")]
    Config(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl StoreError {
    pub(crate) fn storage(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        StoreError::Storage {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Machine-readable overview of a store, written by `summary --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub data_file: PathBuf,
    pub count: usize,
    pub skipped_lines: usize,
    pub average: Option<f64>,
    pub topper: Option<StudentRecord>,
}

impl SummaryReport {
    pub fn from_store(data_file: &Path, store: &RecordStore, skipped_lines: usize) -> Self {
        SummaryReport {
            data_file: data_file.to_path_buf(),
            count: store.len(),
            skipped_lines,
            average: store.average().ok(),
            topper: store.topper().ok().cloned(),
        }
    }
}

// Shared helpers
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .map_err(|e| StoreError::storage("failed to create directory", dir, e))?;
        }
    }
    let json = serde_json::to_vec_pretty(value).map_err(|e| StoreError::Message(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| StoreError::storage("failed to write", path, e))
}
