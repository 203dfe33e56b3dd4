//! Pre-trained classifier consumed by the pipeline.
//!
//! The model is loaded once at startup and then shared read-only; the
//! pipeline only sees the [`Classifier`] trait.

mod forest;

pub use forest::RandomForest;

/// A trained binary classifier over fixed-order numeric feature rows.
pub trait Classifier: Send + Sync {
    /// Feature names in the order `predict` expects them.
    fn feature_names(&self) -> &[String];

    /// Raw prediction per row. For a standard classifier this is the class
    /// label (0.0 or 1.0), not a probability.
    fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64>;

    /// Human-readable model name for logs and the window.
    fn name(&self) -> &str;
}

/// Check that a classifier expects exactly `expected`, in order.
pub fn check_feature_contract(
    classifier: &dyn Classifier,
    expected: &[String],
) -> Result<(), String> {
    let actual = classifier.feature_names();
    if actual == expected {
        return Ok(());
    }
    if actual.len() != expected.len() {
        return Err(format!(
            "model expects {} features, the file provides {}",
            actual.len(),
            expected.len()
        ));
    }
    match expected.iter().zip(actual).position(|(want, got)| want != got) {
        Some(pos) => Err(format!(
            "feature {pos} is '{}' in the model but '{}' in the file",
            actual[pos], expected[pos]
        )),
        None => Ok(()),
    }
}
