use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline error taxonomy
// ---------------------------------------------------------------------------

/// Every way a single load-and-predict run can stop. Each variant renders as
/// the message shown to the user in the error dialog.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Wrong file format. The file must be a CSV file.")]
    Format,

    #[error("Failed to read the data: {0}")]
    Read(String),

    #[error("The file must contain 30 columns.\nNumber of columns: {found}")]
    Schema { found: usize },

    #[error("The first column must contain the transaction hour, an integer from 0 to 23.")]
    Range,

    #[error("Columns 2 to 30 must be numeric (column {column}, row {row} is not).")]
    Type { column: usize, row: usize },

    #[error("The classifier is unavailable: {0}")]
    Classifier(String),

    #[error("Failed to save predictions: {0}")]
    Write(String),
}

impl PipelineError {
    /// Short category name, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Format => "FormatError",
            PipelineError::Read(_) => "ReadError",
            PipelineError::Schema { .. } => "SchemaError",
            PipelineError::Range => "RangeError",
            PipelineError::Type { .. } => "TypeError",
            PipelineError::Classifier(_) => "ClassifierError",
            PipelineError::Write(_) => "WriteError",
        }
    }
}
