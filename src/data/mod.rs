/// Data layer: core types, loading, filtering and the per-view queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, check schema → AuctionDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ AuctionDataset  │  Vec<PlayerRecord> + derived labels, distinct values
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  views    │ ──► │  filter   │  selection → Predicate → row indices
///   └──────────┘     └──────────┘
///        │
///        ▼
///    ViewResult (indices + ChartSpec)
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod views;
