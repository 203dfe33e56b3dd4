use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Settings – fixed paths and constants used by the pipeline
// ---------------------------------------------------------------------------

/// Serialized classifier looked up in the working directory at startup.
pub const MODEL_FILE: &str = "random_forest_model.json";

/// Annotated output for multi-record files; overwritten on every run.
pub const OUTPUT_FILE: &str = "predictions.csv";

/// Raw model outputs at or above this value are labelled fraudulent.
pub const DECISION_THRESHOLD: f64 = 0.2;

/// Runtime settings. There are no flags or environment overrides; the
/// defaults are the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model_path: PathBuf,
    pub output_path: PathBuf,
    pub threshold: f64,
    /// Window size in logical points (fixed, not resizable).
    pub window_size: [f32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(MODEL_FILE),
            output_path: PathBuf::from(OUTPUT_FILE),
            threshold: DECISION_THRESHOLD,
            window_size: [600.0, 300.0],
        }
    }
}
