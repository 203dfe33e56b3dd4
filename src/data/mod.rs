/// Data layer: record layout, loading, validation and output.
///
/// Architecture:
/// ```text
///      .csv (+ "has header?" answer)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  extension gate, parse file → TransactionTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ validate  │  30 columns, hour 0..=23, numeric features
///   └──────────┘
///        │
///        ▼
///   classifier ──► ┌──────────┐
///                  │  writer   │  predictions.csv for multi-record files
///                  └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod validate;
pub mod writer;
