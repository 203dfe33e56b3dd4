use super::model::{CellValue, TransactionTable, N_COLUMNS};
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Shape and type gate in front of the classifier
// ---------------------------------------------------------------------------

const MIN_HOUR: f64 = 0.0;
const MAX_HOUR: f64 = 23.0;

/// Run the four checks in order and stop at the first failure:
///
/// 1. exactly 30 columns ([`PipelineError::Schema`])
/// 2. column 0 coercible to an integer ([`PipelineError::Range`])
/// 3. column 0 within `0..=23` ([`PipelineError::Range`])
/// 4. columns 1–29 numeric ([`PipelineError::Type`])
pub fn validate(table: &TransactionTable) -> Result<(), PipelineError> {
    if table.n_columns() != N_COLUMNS {
        return Err(PipelineError::Schema {
            found: table.n_columns(),
        });
    }

    if !table.column(0).all(|c| coerces_to_integer(&c.value)) {
        return Err(PipelineError::Range);
    }

    if !table.column(0).all(|c| hour_in_range(&c.value)) {
        return Err(PipelineError::Range);
    }

    for col in 1..N_COLUMNS {
        if let Some(row) = first_non_numeric(table, col) {
            // 1-based positions, as a user counts them in a spreadsheet.
            return Err(PipelineError::Type {
                column: col + 1,
                row: row + 1,
            });
        }
    }

    Ok(())
}

/// Row index of the first cell that keeps column `col` from being numeric.
/// A column made only of booleans is numeric; a boolean mixed with anything
/// else is not.
fn first_non_numeric(table: &TransactionTable, col: usize) -> Option<usize> {
    if table.column(col).all(|c| matches!(c.value, CellValue::Bool(_))) {
        return None;
    }
    table.column(col).position(|c| !c.value.is_numeric())
}

/// Integers coerce as-is, finite floats truncate. Missing values, booleans
/// and text do not coerce.
fn coerces_to_integer(value: &CellValue) -> bool {
    match value {
        CellValue::Integer(_) => true,
        CellValue::Float(v) => v.is_finite(),
        CellValue::Bool(_) | CellValue::Missing | CellValue::Text(_) => false,
    }
}

/// Range is checked on the original value, so `23.5` is out of range.
fn hour_in_range(value: &CellValue) -> bool {
    value
        .as_f64()
        .is_some_and(|h| (MIN_HOUR..=MAX_HOUR).contains(&h))
}
