use crate::config::OutputConfig;
use crate::domain::ScoredListing;
use crate::errors::OutputError;
use crate::spreadsheets::export_deals_xlsx;
use std::path::PathBuf;

#[derive(Debug)]
pub struct WrittenFiles {
    pub report: PathBuf,
    pub workbook: Option<PathBuf>,
}

/// Write the report text (and the workbook, if enabled) under the output directory.
pub fn write_outputs(
    text: &str,
    selected: &[ScoredListing],
    output: &OutputConfig,
) -> Result<WrittenFiles, OutputError> {
    std::fs::create_dir_all(&output.dir)?;

    let report = output.dir.join(&output.file_name);
    std::fs::write(&report, text)?;
    tracing::info!(path = %report.display(), bytes = text.len(), "report written");

    let workbook = if output.xlsx {
        let path = output.dir.join("deals.xlsx");
        export_deals_xlsx(selected, &path)?;
        Some(path)
    } else {
        None
    };

    Ok(WrittenFiles { report, workbook })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("listing_scout_{name}_{}", std::process::id()))
    }

    #[test]
    fn report_lands_in_nested_dir() {
        let dir = scratch_dir("nested").join("a").join("b");
        let output = OutputConfig {
            dir: dir.clone(),
            file_name: "output.txt".into(),
            xlsx: false,
        };

        let written = write_outputs("🔥 hello\n", &[], &output).unwrap();
        assert_eq!(written.report, dir.join("output.txt"));
        assert!(written.workbook.is_none());
        assert_eq!(std::fs::read_to_string(&written.report).unwrap(), "🔥 hello\n");

        let _ = std::fs::remove_dir_all(scratch_dir("nested"));
    }

    #[test]
    fn workbook_written_when_enabled() {
        let dir = scratch_dir("xlsx");
        let output = OutputConfig {
            dir: dir.clone(),
            file_name: "output.txt".into(),
            xlsx: true,
        };

        let written = write_outputs("", &[], &output).unwrap();
        let workbook = written.workbook.unwrap();
        assert!(workbook.exists());

        let _ = std::fs::remove_dir_all(dir);
    }
}
