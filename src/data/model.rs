// ---------------------------------------------------------------------------
// Column layout of a transaction record
// ---------------------------------------------------------------------------

/// Number of fields in an input record: hour, V1..V28, amount.
pub const N_COLUMNS: usize = 30;

/// Number of anonymized features between the hour and the amount.
pub const N_ANONYMIZED: usize = 28;

pub const HOUR_COLUMN: &str = "Hour";
pub const AMOUNT_COLUMN: &str = "Amount";
pub const AMOUNT_LOG_COLUMN: &str = "Amount_log";
pub const PREDICTION_COLUMN: &str = "Prediction";

/// Positional names given to the 30 input columns:
/// `Hour, V1, …, V28, Amount`.
pub fn column_names() -> Vec<String> {
    let mut names = Vec::with_capacity(N_COLUMNS);
    names.push(HOUR_COLUMN.to_string());
    names.extend((1..=N_ANONYMIZED).map(|i| format!("V{i}")));
    names.push(AMOUNT_COLUMN.to_string());
    names
}

/// Feature order handed to the classifier: the relabeled input columns
/// followed by the derived `Amount_log`.
pub fn feature_names() -> Vec<String> {
    let mut names = column_names();
    names.push(AMOUNT_LOG_COLUMN.to_string());
    names
}

// ---------------------------------------------------------------------------
// CellValue – a single parsed cell
// ---------------------------------------------------------------------------

/// Dtype guessed for one CSV cell, in the spirit of a dataframe reader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    /// `True`/`False`; numeric only when the whole column is boolean.
    Bool(bool),
    /// Empty cell or an NA token; numeric NaN for type purposes.
    Missing,
    Text(String),
}

/// Cells read as missing, matching the usual dataframe reader defaults.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_TOKENS: &[&str] = &["True", "TRUE", "true"];
const FALSE_TOKENS: &[&str] = &["False", "FALSE", "false"];

impl CellValue {
    /// Guess the type of a raw cell.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() || NA_TOKENS.contains(&s) {
            return CellValue::Missing;
        }
        if TRUE_TOKENS.contains(&s) {
            return CellValue::Bool(true);
        }
        if FALSE_TOKENS.contains(&s) {
            return CellValue::Bool(false);
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::Text(s.to_string())
    }

    /// Numeric view of the cell. Missing maps to NaN, booleans to 0/1,
    /// text has none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Bool(b) => Some(f64::from(u8::from(*b))),
            CellValue::Missing => Some(f64::NAN),
            CellValue::Text(_) => None,
        }
    }

    /// Numeric on its own. Booleans only count as a whole column, see
    /// `validate`.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellValue::Integer(_) | CellValue::Float(_) | CellValue::Missing
        )
    }
}

// ---------------------------------------------------------------------------
// Cell – raw text plus its parsed value
// ---------------------------------------------------------------------------

/// One cell. The raw text is kept so the saved output repeats the input
/// exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub raw: String,
    pub value: CellValue,
}

impl Cell {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            value: CellValue::parse(raw),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionTable – the loaded dataset
// ---------------------------------------------------------------------------

/// A freshly loaded CSV: optional header plus rows of uniform width.
#[derive(Debug, Clone)]
pub struct TransactionTable {
    /// Header names as found in the file (only when the user said so).
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<Cell>>,
    n_columns: usize,
}

impl TransactionTable {
    /// Build a table. The width comes from the header when present,
    /// otherwise from the first row.
    pub fn new(headers: Option<Vec<String>>, rows: Vec<Vec<Cell>>) -> Self {
        let n_columns = headers
            .as_ref()
            .map(Vec::len)
            .or_else(|| rows.first().map(Vec::len))
            .unwrap_or(0);
        Self {
            headers,
            rows,
            n_columns,
        }
    }

    /// Convenience constructor from raw string rows, without a header.
    #[cfg(test)]
    pub fn from_raw_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(|c| Cell::new(c.as_ref())).collect())
            .collect();
        Self::new(None, rows)
    }

    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over one column, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }
}
