//! vmlens: grouped memory/storage aggregation over virtual-machine
//! inventory exports.
//!
//! The pipeline is `data::loader` (CSV → raw rows) → `data::normalize`
//! (raw rows → typed records) → [`aggregate::aggregate`] (grouped sums,
//! chart-ready). [`state::InventoryStore`] holds the single active dataset
//! generation for callers that serve queries against a replaceable upload.

pub mod aggregate;
pub mod cli;
pub mod data;
pub mod error;
pub mod state;

pub use aggregate::{aggregate, AggregateResult, GroupBy, GroupTotals, Metric};
pub use data::filter::RecordFilter;
pub use data::loader::{load_csv, read_raw_records};
pub use data::model::{RawRecord, StorageUnit, VmDataset, VmRecord, POWERED_ON};
pub use data::normalize::{normalize, normalize_lossy};
pub use error::{MalformedRecord, QueryError, RecordField};
pub use state::InventoryStore;
