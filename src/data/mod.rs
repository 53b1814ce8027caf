/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SurveyDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SurveyDataset │  Vec<Record>, categorical domains
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply dropdown selection → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  group + mean / count / five-number summary
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
