/// Data layer: core types, loading, selection and views.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   Dataset     │  Vec<Row>, column index, factor levels
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  value predicates / grouping → row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DatasetView   │  Arc<Dataset> + indices, materialize on demand
///   └──────────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod view;

pub use model::{Dataset, Row, Value};
pub use view::DatasetView;
