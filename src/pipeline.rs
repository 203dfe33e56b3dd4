use std::path::PathBuf;

use crate::classifier::{check_feature_contract, Classifier};
use crate::config::Settings;
use crate::data::model::{feature_names, TransactionTable, N_COLUMNS};
use crate::data::writer::write_predictions;
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Outcome of a successful prediction run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Header only, nothing to classify.
    NoRecords,
    /// Exactly one record; the label is shown, nothing is written.
    Single { fraudulent: bool },
    /// Two or more records written to `path`.
    Saved { path: PathBuf, rows: usize },
}

impl Outcome {
    /// Dialog title and body for the user.
    pub fn message(&self) -> (&'static str, String) {
        match self {
            Outcome::NoRecords => (
                "Prediction",
                "The file contains no records; nothing to predict.".to_string(),
            ),
            Outcome::Single { fraudulent } => (
                "Prediction",
                format!(
                    "The file contains one record.\nThe model classifies the transaction as {}.",
                    label_phrase(*fraudulent)
                ),
            ),
            Outcome::Saved { path, rows } => (
                "Saved",
                format!(
                    "Data with predictions ({rows} records) saved to {}",
                    path.display()
                ),
            ),
        }
    }
}

pub fn label_phrase(fraudulent: bool) -> &'static str {
    if fraudulent {
        "fraudulent"
    } else {
        "non-fraudulent"
    }
}

// ---------------------------------------------------------------------------
// Feature preparation
// ---------------------------------------------------------------------------

/// Numeric rows in classifier order (`Hour, V1..V28, Amount, Amount_log`)
/// plus the derived `Amount_log` column on its own.
///
/// Expects a validated table; anything non-numeric would become NaN.
pub fn feature_rows(table: &TransactionTable) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut rows = Vec::with_capacity(table.len());
    let mut amount_log = Vec::with_capacity(table.len());

    for record in &table.rows {
        let mut features: Vec<f64> = record
            .iter()
            .map(|c| c.value.as_f64().unwrap_or(f64::NAN))
            .collect();
        let amount = features.get(N_COLUMNS - 1).copied().unwrap_or(f64::NAN);
        let log_amount = amount.ln_1p();
        features.push(log_amount);

        rows.push(features);
        amount_log.push(log_amount);
    }

    (rows, amount_log)
}

/// Label a row fraudulent (1) when its raw output is at or above
/// `threshold`.
///
/// Applied to whatever `predict` returns. For a classifier that outputs hard
/// 0/1 labels this keeps the labels unchanged.
pub fn apply_threshold(raw: &[f64], threshold: f64) -> Vec<u8> {
    raw.iter().map(|&p| u8::from(p >= threshold)).collect()
}

// ---------------------------------------------------------------------------
// predict
// ---------------------------------------------------------------------------

/// Classify a validated table and report or persist the result.
pub fn predict(
    table: &TransactionTable,
    classifier: &dyn Classifier,
    settings: &Settings,
) -> Result<Outcome, PipelineError> {
    if table.is_empty() {
        log::info!("No records after the header; skipping prediction");
        return Ok(Outcome::NoRecords);
    }

    check_feature_contract(classifier, &feature_names()).map_err(PipelineError::Classifier)?;

    let (rows, amount_log) = feature_rows(table);
    let raw = classifier.predict(&rows);
    if raw.len() != rows.len() {
        return Err(PipelineError::Classifier(format!(
            "{} predictions for {} records",
            raw.len(),
            rows.len()
        )));
    }
    let labels = apply_threshold(&raw, settings.threshold);
    let n_fraud = labels.iter().filter(|&&l| l == 1).count();
    log::info!(
        "{} classified {} records, {} fraudulent",
        classifier.name(),
        labels.len(),
        n_fraud
    );

    if let [label] = labels.as_slice() {
        return Ok(Outcome::Single {
            fraudulent: *label == 1,
        });
    }

    write_predictions(&settings.output_path, table, &amount_log, &labels).map_err(|e| {
        log::error!("Failed to write {}: {e:#}", settings.output_path.display());
        PipelineError::Write(format!("{e:#}"))
    })?;
    log::info!("Saved predictions to {}", settings.output_path.display());

    Ok(Outcome::Saved {
        path: settings.output_path.clone(),
        rows: labels.len(),
    })
}
