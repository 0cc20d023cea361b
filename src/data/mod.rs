/// Data layer: core types, loading, filtering, and derived views.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → FlightTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ FlightTable  │  Vec<FlightRecord>, input header
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterCriteria → working-set indices
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ summary   │   │  export   │  metrics / chart tallies, CSV bytes
///   └──────────┘   └──────────┘
/// ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
