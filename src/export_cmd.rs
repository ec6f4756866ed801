use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::query_cmd::load;
use crate::storage::CsvExporter;
use crate::{StoreConfig, StoreResult};

/// Export the data file to CSV at `output`, or the configured export file.
///
/// Returns the path written.
pub fn run<W: Write>(
    config: &StoreConfig,
    out: &mut W,
    output: Option<PathBuf>,
) -> StoreResult<PathBuf> {
    let (_, report) = load(config)?;
    let output = output.unwrap_or_else(|| config.export_file.clone());
    export_records(config, out, report.store.records(), &output)?;
    Ok(output)
}

pub(crate) fn export_records<W: Write>(
    config: &StoreConfig,
    out: &mut W,
    records: &[crate::StudentRecord],
    output: &Path,
) -> StoreResult<()> {
    CsvExporter::with_style(config.csv_style).export(records, output)?;
    info!(path = %output.display(), records = records.len(), "export complete");
    writeln!(out, "Data exported to {}", output.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CsvStyle;

    #[test]
    fn test_export_uses_configured_path_and_style() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("students.txt");
        std::fs::write(&data, "4 Doe; Jane,70\n").unwrap();
        let mut cfg = StoreConfig::default()
            .with_overrides(Some(data), Some(dir.path().join("class.csv")));
        cfg.csv_style = CsvStyle::Quoted;

        let mut out = Vec::new();
        let written = run(&cfg, &mut out, None).unwrap();

        assert_eq!(written, dir.path().join("class.csv"));
        assert_eq!(
            std::fs::read_to_string(&written).unwrap(),
            "Roll No,Name,Marks\n4,Doe; Jane,70.0\n"
        );
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Data exported to {}\n", written.display())
        );
    }
}
