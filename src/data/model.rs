use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

/// Power-state literal marking a machine as online. Any other value
/// (e.g. "powered-off", "suspended") counts as offline.
pub const POWERED_ON: &str = "powered-on";

// ---------------------------------------------------------------------------
// RawRecord – one inventory row as exported
// ---------------------------------------------------------------------------

/// One row of the inventory export, untouched text columns.
///
/// Columns are bound by header name, never by position:
/// * `name`                – composite, dash-delimited: owner-purpose-rest
/// * `power-state`         – enumerated string, see [`POWERED_ON`]
/// * `memory-size`         – `"<float> <unit>"`, unit is GB today
/// * `provisioned-storage` – `"<float-with-thousands-separators> <GB|TB>"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    pub name: String,
    #[serde(rename = "power-state")]
    pub power_state: String,
    #[serde(rename = "memory-size")]
    pub memory_text: String,
    #[serde(rename = "provisioned-storage")]
    pub storage_text: String,
}

// ---------------------------------------------------------------------------
// StorageUnit – explicit unit type with a conversion table
// ---------------------------------------------------------------------------

/// Storage size unit token. GB is the canonical unit; only the GB/TB pair
/// converts losslessly. Unrecognized tokens are carried as `Other` and pass
/// through with factor 1 (the caller is expected to warn, never to coerce
/// silently).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageUnit {
    Gb,
    Tb,
    Other(String),
}

impl StorageUnit {
    /// Parse a unit token as it appears in the export.
    pub fn parse(token: &str) -> Self {
        match token {
            "GB" => StorageUnit::Gb,
            "TB" => StorageUnit::Tb,
            other => StorageUnit::Other(other.to_string()),
        }
    }

    /// Multiplier that converts a value in this unit to GB.
    pub fn to_gb_factor(&self) -> f64 {
        match self {
            StorageUnit::Gb => 1.0,
            StorageUnit::Tb => 1024.0,
            StorageUnit::Other(_) => 1.0,
        }
    }

    /// Whether the token was one of the supported units.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, StorageUnit::Other(_))
    }
}

impl fmt::Display for StorageUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageUnit::Gb => write!(f, "GB"),
            StorageUnit::Tb => write!(f, "TB"),
            StorageUnit::Other(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// VmRecord – one normalized row
// ---------------------------------------------------------------------------

/// A single machine with query-ready derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct VmRecord {
    /// First dash-delimited segment of the name; `None` for an empty name.
    pub owner: Option<String>,
    /// Second dash-delimited segment; `None` when the name has fewer than
    /// two segments.
    pub purpose: Option<String>,
    /// Memory in GB.
    pub memory_gb: f64,
    /// Provisioned storage in GB.
    pub storage_gb: f64,
    /// Power state, verbatim from the export.
    pub power_state: String,
}

impl VmRecord {
    /// Online means exact equality with the powered-on literal.
    pub fn is_online(&self) -> bool {
        self.power_state == POWERED_ON
    }
}

// ---------------------------------------------------------------------------
// VmDataset – the complete normalized dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset with pre-computed group-key indexes.
/// Immutable once built; queries only ever read it.
#[derive(Debug, Clone, Default)]
pub struct VmDataset {
    /// All machines (rows), in input order.
    pub records: Vec<VmRecord>,
    /// Sorted set of distinct owners (records with a defined owner).
    pub owners: BTreeSet<String>,
    /// Sorted set of distinct purposes (records with a defined purpose).
    pub purposes: BTreeSet<String>,
}

impl VmDataset {
    /// Build group-key indexes from normalized records.
    pub fn from_records(records: Vec<VmRecord>) -> Self {
        let mut owners = BTreeSet::new();
        let mut purposes = BTreeSet::new();
        for rec in &records {
            if let Some(owner) = &rec.owner {
                owners.insert(owner.clone());
            }
            if let Some(purpose) = &rec.purpose {
                purposes.insert(purpose.clone());
            }
        }
        VmDataset {
            records,
            owners,
            purposes,
        }
    }

    /// Number of machines.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct owners among records passing `filter`, sorted ascending.
    pub fn owners_matching(&self, filter: &super::filter::RecordFilter) -> Vec<String> {
        if *filter == super::filter::RecordFilter::all() {
            return self.owners.iter().cloned().collect();
        }
        let mut out = BTreeSet::new();
        for rec in self.records.iter().filter(|r| filter.matches(r)) {
            if let Some(owner) = &rec.owner {
                out.insert(owner.clone());
            }
        }
        out.into_iter().collect()
    }

    /// Distinct purposes among records passing `filter`, sorted ascending.
    pub fn purposes_matching(&self, filter: &super::filter::RecordFilter) -> Vec<String> {
        if *filter == super::filter::RecordFilter::all() {
            return self.purposes.iter().cloned().collect();
        }
        let mut out = BTreeSet::new();
        for rec in self.records.iter().filter(|r| filter.matches(r)) {
            if let Some(purpose) = &rec.purpose {
                out.insert(purpose.clone());
            }
        }
        out.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::RecordFilter;

    fn rec(owner: &str, purpose: &str, state: &str) -> VmRecord {
        VmRecord {
            owner: Some(owner.to_string()),
            purpose: Some(purpose.to_string()),
            memory_gb: 1.0,
            storage_gb: 1.0,
            power_state: state.to_string(),
        }
    }

    #[test]
    fn unit_parse_and_factor() {
        assert_eq!(StorageUnit::parse("GB"), StorageUnit::Gb);
        assert_eq!(StorageUnit::parse("TB"), StorageUnit::Tb);
        assert_eq!(
            StorageUnit::parse("MiB"),
            StorageUnit::Other("MiB".to_string())
        );
        assert_eq!(StorageUnit::Gb.to_gb_factor(), 1.0);
        assert_eq!(StorageUnit::Tb.to_gb_factor(), 1024.0);
        assert_eq!(StorageUnit::parse("MiB").to_gb_factor(), 1.0);
        assert!(!StorageUnit::parse("MiB").is_recognized());
    }

    #[test]
    fn online_is_exact_match() {
        assert!(rec("a", "db", POWERED_ON).is_online());
        assert!(!rec("a", "db", "powered-off").is_online());
        assert!(!rec("a", "db", "Powered-On").is_online());
    }

    #[test]
    fn dataset_indexes_distinct_keys() {
        let ds = VmDataset::from_records(vec![
            rec("bob", "db", POWERED_ON),
            rec("bob", "web", "powered-off"),
            rec("amy", "db", POWERED_ON),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.owners.iter().cloned().collect::<Vec<_>>(),
            vec!["amy".to_string(), "bob".to_string()]
        );
        assert_eq!(
            ds.purposes.iter().cloned().collect::<Vec<_>>(),
            vec!["db".to_string(), "web".to_string()]
        );
    }

    #[test]
    fn matching_keys_honor_filter() {
        let ds = VmDataset::from_records(vec![
            rec("bob", "db", POWERED_ON),
            rec("amy", "web", "powered-off"),
        ]);
        assert_eq!(ds.owners_matching(&RecordFilter::all()), vec!["amy", "bob"]);
        assert_eq!(ds.owners_matching(&RecordFilter::online()), vec!["bob"]);
        assert_eq!(ds.purposes_matching(&RecordFilter::online()), vec!["db"]);
    }
}
