use crate::util::error::{HexPixError, Result};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes a CSV file through a temporary file next to `path` and moves it
/// into place only when `write` succeeds. On failure `path` keeps whatever
/// it held before, and the temporary file is removed.
pub(crate) fn write_csv_atomically<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut csv::Writer<&mut NamedTempFile>) -> Result<T>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(|e| HexPixError::IoError(e.to_string()))?;

    let value = {
        let mut writer = csv::Writer::from_writer(&mut staged);
        let value = write(&mut writer)?;
        writer
            .flush()
            .map_err(|e| HexPixError::CsvError(e.to_string()))?;
        value
    };

    staged
        .persist(path)
        .map_err(|e| HexPixError::IoError(e.error.to_string()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn read(path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| HexPixError::IoError(e.to_string()))
    }

    #[test]
    fn test_output_appears_on_success() -> Result<()> {
        let dir = tempdir().map_err(|e| HexPixError::IoError(e.to_string()))?;
        let path = dir.path().join("out.csv");

        let rows = write_csv_atomically(&path, |writer| {
            writer
                .write_record(["a", "b"])
                .map_err(|e| HexPixError::CsvError(e.to_string()))?;
            Ok(1)
        })?;

        assert_eq!(rows, 1);
        assert_eq!(read(&path)?, "a,b\n");
        Ok(())
    }

    #[test]
    fn test_failure_leaves_previous_contents_and_no_stray_files() -> Result<()> {
        let dir = tempdir().map_err(|e| HexPixError::IoError(e.to_string()))?;
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "previous\n").map_err(|e| HexPixError::IoError(e.to_string()))?;

        let result: Result<()> = write_csv_atomically(&path, |writer| {
            writer
                .write_record(["half", "written"])
                .map_err(|e| HexPixError::CsvError(e.to_string()))?;
            Err(HexPixError::CsvError("bad row".to_string()))
        });

        assert_eq!(result, Err(HexPixError::CsvError("bad row".to_string())));
        assert_eq!(read(&path)?, "previous\n");

        let entries = std::fs::read_dir(dir.path())
            .map_err(|e| HexPixError::IoError(e.to_string()))?
            .count();
        assert_eq!(entries, 1);
        Ok(())
    }
}
