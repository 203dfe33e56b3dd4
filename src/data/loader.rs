use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{Cell, TransactionTable};
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Reject anything whose name does not end in `.csv` (case-insensitive)
/// before the file is touched. A file named just `.csv` is accepted.
pub fn check_extension(path: &Path) -> Result<(), PipelineError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if name.ends_with(".csv") {
        Ok(())
    } else {
        Err(PipelineError::Format)
    }
}

/// Load a transaction table from a CSV file.
///
/// `has_header` is the user's answer, not something sniffed from the file:
/// when true the first row becomes the header, otherwise every row is data.
pub fn load_file(path: &Path, has_header: bool) -> Result<TransactionTable, PipelineError> {
    check_extension(path)?;
    read_csv(path, has_header).map_err(|e| PipelineError::Read(format!("{e:#}")))
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path, has_header: bool) -> Result<TransactionTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(false)
        .from_path(path)
        .context("opening CSV")?;

    let headers = if has_header {
        let names: Vec<String> = reader
            .headers()
            .context("reading CSV header")?
            .iter()
            .map(|h| h.to_string())
            .collect();
        Some(names)
    } else {
        None
    };

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(Cell::new).collect::<Vec<_>>());
    }

    let table = TransactionTable::new(headers.filter(|h| !h.is_empty()), rows);
    if table.n_columns() == 0 {
        bail!("no columns to parse from file");
    }

    log::debug!(
        "Read {} rows x {} columns from {}",
        table.len(),
        table.n_columns(),
        path.display()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;
    use crate::data::model::CellValue;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents).unwrap();
        path
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(check_extension(Path::new("data.csv")).is_ok());
        assert!(check_extension(Path::new("DATA.CSV")).is_ok());
        assert!(check_extension(Path::new("/tmp/.csv")).is_ok());
        assert!(check_extension(Path::new("report.Csv")).is_ok());
        assert!(matches!(
            check_extension(Path::new("/tmp/csv")),
            Err(PipelineError::Format)
        ));
        assert!(matches!(
            check_extension(Path::new("data.txt")),
            Err(PipelineError::Format)
        ));
        assert!(matches!(
            check_extension(Path::new("data")),
            Err(PipelineError::Format)
        ));
    }

    #[test]
    fn wrong_extension_never_reads() {
        // The path does not exist; a read attempt would give ReadError.
        let err = load_file(Path::new("/nonexistent/input.xlsx"), false).unwrap_err();
        assert!(matches!(err, PipelineError::Format));
    }

    #[test]
    fn header_assertion_controls_first_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "t.csv", b"a,b\n1,2\n3,4\n");

        let with = load_file(&path, true).unwrap();
        assert_eq!(with.headers, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(with.len(), 2);

        let without = load_file(&path, false).unwrap();
        assert_eq!(without.headers, None);
        assert_eq!(without.len(), 3);
        assert_eq!(without.rows[0][0].value, CellValue::Text("a".into()));
        assert_eq!(without.rows[1][0].value, CellValue::Integer(1));
    }

    #[test]
    fn ragged_rows_are_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "ragged.csv", b"1,2,3\n4,5\n");
        let err = load_file(&path, false).unwrap_err();
        assert!(matches!(err, PipelineError::Read(_)), "{err}");
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.csv", b"1,2\n\xff\xfe,3\n");
        let err = load_file(&path, false).unwrap_err();
        assert!(matches!(err, PipelineError::Read(_)), "{err}");
    }

    #[test]
    fn empty_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.csv", b"");
        assert!(matches!(load_file(&path, true), Err(PipelineError::Read(_))));
        assert!(matches!(load_file(&path, false), Err(PipelineError::Read(_))));
    }

    #[test]
    fn missing_file_reports_cause() {
        let err = load_file(Path::new("/nonexistent/input.csv"), false).unwrap_err();
        match err {
            PipelineError::Read(msg) => assert!(msg.contains("opening CSV"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "h.csv", b"a,b,c\n");
        let table = load_file(&path, true).unwrap();
        assert_eq!(table.n_columns(), 3);
        assert!(table.is_empty());
    }
}
