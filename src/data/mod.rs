/// Data layer: core types, loading, normalization, and filtering.
///
/// Architecture:
/// ```text
///  inventory .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRecord> (columns keyed by header)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  derive owner/purpose, memory_gb, storage_gb
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ VmDataset  │  Vec<VmRecord>, distinct owner/purpose indexes
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  record predicates (online-only, owner/purpose equality)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
