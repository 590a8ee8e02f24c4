/// Data layer: core types, loading, and statistics.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Column>, column-major, row order preserved
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  describe stats, group means, histogram bins
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod summary;
