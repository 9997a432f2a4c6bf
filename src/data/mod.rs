/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  bundled iris.csv / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse records → IrisDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  IrisDataset  │  Vec<Observation>, stable RowId per row
///   └──────────────┘
/// ```

pub mod loader;
pub mod model;
