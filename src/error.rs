use std::fmt;

use thiserror::Error;

/// Which raw field of a row failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    MemoryText,
    StorageText,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordField::MemoryText => write!(f, "memory-size"),
            RecordField::StorageText => write!(f, "provisioned-storage"),
        }
    }
}

/// A row whose size fields don't parse. Recoverable: the caller chooses
/// between dropping the row and rejecting the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: malformed {field} value {value:?}")]
pub struct MalformedRecord {
    /// Zero-based index into the input row sequence.
    pub row: usize,
    pub field: RecordField,
    /// The offending raw text, for diagnostics.
    pub value: String,
}

/// A query rejected before any computation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown group dimension {0:?}, expected \"owner\" or \"purpose\"")]
    UnknownGroupDimension(String),

    #[error("unknown metric {0:?}, expected \"memory\" or \"storage\"")]
    UnknownMetric(String),

    #[error("no metrics requested")]
    NoMetrics,
}
