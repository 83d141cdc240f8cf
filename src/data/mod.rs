/// Data layer: records, loading, filtering and counting.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌───────────────┐
///   │ DatasetSource │  read once → Arc<Table>
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  category / gender selection → derived Table
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  value counts, descending, ties by first appearance
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
