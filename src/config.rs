use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::storage::CsvStyle;
use crate::{StoreError, StoreResult};

pub const DEFAULT_DATA_FILE: &str = "students.txt";
pub const DEFAULT_EXPORT_FILE: &str = "exported_students.csv";

/// Where records live and how they are exported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub data_file: PathBuf,
    pub export_file: PathBuf,
    pub csv_style: CsvStyle,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
            csv_style: CsvStyle::default(),
        }
    }
}

impl StoreConfig {
    /// Replace file locations with those given on the command line.
    pub fn with_overrides(
        mut self,
        data_file: Option<PathBuf>,
        export_file: Option<PathBuf>,
    ) -> Self {
        if let Some(p) = data_file {
            self.data_file = p;
        }
        if let Some(p) = export_file {
            self.export_file = p;
        }
        self
    }
}

pub fn load_config(path: &Path) -> StoreResult<StoreConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| StoreError::storage("failed to read config", path, e))?;
    parse_config(&s)
}

pub fn parse_config(s: &str) -> StoreResult<StoreConfig> {
    toml::from_str(s).map_err(|e| StoreError::Config(e.to_string()))
}

/// Load `path` when given, otherwise the defaults.
pub fn resolve_config(path: Option<&Path>) -> StoreResult<StoreConfig> {
    match path {
        Some(p) => load_config(p),
        None => Ok(StoreConfig::default()),
    }
}
