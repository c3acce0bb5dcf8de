/// Data layer: result tables, loading, and row filtering.
///
/// Architecture:
/// ```text
///  results/*.csv  (`;`-separated, one row per instance)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ResultTable (trimmed, unique headers)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ ResultTable  │  Vec<ResultRow>, renames, numeric columns
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  TLR / status predicates → row indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
