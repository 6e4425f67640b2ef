use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use timesheet_core::models::CsvDownload;

/// Write an exported CSV into `dir` and return the path written.
///
/// The file name comes from the server, so only its final component is used.
pub fn write_csv(dir: &Path, download: &CsvDownload) -> Result<PathBuf> {
    let file_name = Path::new(&download.file_name)
        .file_name()
        .context("Export has no usable file name")?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(file_name);
    std::fs::write(&path, download.content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_into_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        let download = CsvDownload {
            file_name: "invoices.csv".to_string(),
            content: "a,b\n1,2\n".to_string(),
        };

        let path = write_csv(&dir.path().join("exports"), &download).unwrap();

        assert_eq!(path, dir.path().join("exports").join("invoices.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "a,b\n1,2\n");
    }

    #[test]
    fn strips_directories_from_server_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let download = CsvDownload {
            file_name: "../../etc/invoices.csv".to_string(),
            content: String::new(),
        };

        let path = write_csv(dir.path(), &download).unwrap();

        assert_eq!(path, dir.path().join("invoices.csv"));
    }

    #[test]
    fn empty_file_name_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let download = CsvDownload {
            file_name: String::new(),
            content: String::new(),
        };

        assert!(write_csv(dir.path(), &download).is_err());
    }
}
