use std::path::Path;

use anyhow::{ensure, Context, Result};

use super::model::{feature_names, TransactionTable, PREDICTION_COLUMN};

// ---------------------------------------------------------------------------
// predictions.csv writer
// ---------------------------------------------------------------------------

/// Write the relabeled records, the derived `Amount_log` column and the
/// `Prediction` label to `path`, replacing any existing file.
///
/// Input cells are written back with their original text; row order is the
/// input order.
pub fn write_predictions(
    path: &Path,
    table: &TransactionTable,
    amount_log: &[f64],
    labels: &[u8],
) -> Result<()> {
    ensure!(
        amount_log.len() == table.len() && labels.len() == table.len(),
        "{} rows but {} derived values and {} labels",
        table.len(),
        amount_log.len(),
        labels.len()
    );

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = feature_names();
    header.push(PREDICTION_COLUMN.to_string());
    writer.write_record(&header).context("writing header")?;

    for (row_no, ((row, log_amount), label)) in table
        .rows
        .iter()
        .zip(amount_log)
        .zip(labels)
        .enumerate()
    {
        let mut record: Vec<String> = row.iter().map(|c| c.raw.clone()).collect();
        record.push(log_amount.to_string());
        record.push(label.to_string());
        writer
            .write_record(&record)
            .with_context(|| format!("writing row {row_no}"))?;
    }

    writer.flush().context("flushing output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_rows_and_labels_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let rows: Vec<Vec<String>> = (0..3)
            .map(|i| (0..30).map(|c| format!("{}", i * 100 + c)).collect())
            .collect();
        let table = TransactionTable::from_raw_rows(rows);
        write_predictions(&path, &table, &[1.0, 2.0, 3.5], &[0, 1, 0]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header = reader.headers().unwrap().clone();
        assert_eq!(header.len(), 32);
        assert_eq!(&header[0], "Hour");
        assert_eq!(&header[30], "Amount_log");
        assert_eq!(&header[31], "Prediction");

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(&records[1][0], "100");
        assert_eq!(&records[2][30], "3.5");
        let labels: Vec<&str> = records.iter().map(|r| &r[31]).collect();
        assert_eq!(labels, ["0", "1", "0"]);
    }

    #[test]
    fn overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents that are much longer than the new file\n".repeat(100))
            .unwrap();

        let table = TransactionTable::from_raw_rows([vec!["1"; 30], vec!["2"; 30]]);
        write_predictions(&path, &table, &[0.5, 0.5], &[1, 1]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn misaligned_labels_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let table = TransactionTable::from_raw_rows([vec!["1"; 30], vec!["2"; 30]]);
        assert!(write_predictions(&path, &table, &[0.5, 0.5], &[1]).is_err());
        assert!(!path.exists());
    }
}
