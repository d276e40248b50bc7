use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::data::filter::RecordFilter;
use crate::data::model::{VmDataset, VmRecord};
use crate::error::QueryError;

// ---------------------------------------------------------------------------
// Query vocabulary
// ---------------------------------------------------------------------------

/// Which derived field partitions the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Owner,
    Purpose,
}

impl GroupBy {
    fn key_of(self, record: &VmRecord) -> Option<String> {
        match self {
            GroupBy::Owner => record.owner.clone(),
            GroupBy::Purpose => record.purpose.clone(),
        }
    }
}

impl FromStr for GroupBy {
    type Err = QueryError;

    /// Parsed once at the caller boundary; anything else is rejected
    /// before any computation runs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(GroupBy::Owner),
            "purpose" => Ok(GroupBy::Purpose),
            other => Err(QueryError::UnknownGroupDimension(other.to_string())),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Owner => write!(f, "owner"),
            GroupBy::Purpose => write!(f, "purpose"),
        }
    }
}

/// A summable metric of a normalized record, in GB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    MemoryGb,
    StorageGb,
}

impl Metric {
    fn value_of(self, record: &VmRecord) -> f64 {
        match self {
            Metric::MemoryGb => record.memory_gb,
            Metric::StorageGb => record.storage_gb,
        }
    }
}

impl FromStr for Metric {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Metric::MemoryGb),
            "storage" => Ok(Metric::StorageGb),
            other => Err(QueryError::UnknownMetric(other.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::MemoryGb => write!(f, "memory"),
            Metric::StorageGb => write!(f, "storage"),
        }
    }
}

// ---------------------------------------------------------------------------
// Result table
// ---------------------------------------------------------------------------

/// One output row: a group key and its metric sums, aligned with the
/// requested metric order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotals {
    /// `None` is the undefined group (records whose name lacked the
    /// grouped segment); it is a group like any other.
    pub key: Option<String>,
    pub totals: Vec<f64>,
}

impl GroupTotals {
    /// Group label as a chart renderer sees it; the undefined group is
    /// labeled blank.
    pub fn label(&self) -> &str {
        self.key.as_deref().unwrap_or("")
    }
}

/// Ordered grouped sums for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    /// Requested metrics, deduplicated, in request order.
    pub metrics: Vec<Metric>,
    /// Output rows, sorted descending by the primary metric.
    pub groups: Vec<GroupTotals>,
}

impl AggregateResult {
    /// The labeled (label, value) series for one metric, which is the whole
    /// contract a bar/pie renderer needs. `None` if the metric was not
    /// part of the query.
    pub fn series(&self, metric: Metric) -> Option<Vec<(String, f64)>> {
        let idx = self.metrics.iter().position(|&m| m == metric)?;
        Some(
            self.groups
                .iter()
                .map(|g| (g.label().to_string(), g.totals[idx]))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// The engine
// ---------------------------------------------------------------------------

/// Sum `metrics` per `group_by` key over the records passing `filter`.
///
/// Read-only over the dataset. Rows are ordered descending by the primary
/// metric (`memory` when requested, else the first requested metric), with
/// ties broken by ascending group key; the undefined group sorts before all
/// named keys. An empty dataset yields an empty result, not an error.
pub fn aggregate(
    dataset: &VmDataset,
    group_by: GroupBy,
    filter: &RecordFilter,
    metrics: &[Metric],
) -> Result<AggregateResult, QueryError> {
    if metrics.is_empty() {
        return Err(QueryError::NoMetrics);
    }
    let mut requested: Vec<Metric> = Vec::with_capacity(metrics.len());
    for &metric in metrics {
        if !requested.contains(&metric) {
            requested.push(metric);
        }
    }

    // Accumulate in first-encounter order; the sort below is stable.
    let mut index: HashMap<Option<String>, usize> = HashMap::new();
    let mut groups: Vec<GroupTotals> = Vec::new();

    for record in dataset.records.iter().filter(|r| filter.matches(r)) {
        let key = group_by.key_of(record);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(GroupTotals {
                key,
                totals: vec![0.0; requested.len()],
            });
            groups.len() - 1
        });
        for (i, &metric) in requested.iter().enumerate() {
            groups[slot].totals[i] += metric.value_of(record);
        }
    }

    let primary = requested
        .iter()
        .position(|&m| m == Metric::MemoryGb)
        .unwrap_or(0);
    groups.sort_by(|a, b| {
        b.totals[primary]
            .total_cmp(&a.totals[primary])
            .then_with(|| a.key.cmp(&b.key))
    });

    Ok(AggregateResult {
        metrics: requested,
        groups,
    })
}
