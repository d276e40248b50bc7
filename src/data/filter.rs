use super::model::VmRecord;

// ---------------------------------------------------------------------------
// Filter predicate applied before grouping
// ---------------------------------------------------------------------------

/// Record predicate, applied before grouping.
///
/// All terms are conjunctive. An unset term means "no constraint", so
/// `RecordFilter::all()` passes every record. Whether powered-off machines
/// count is always an explicit caller decision; nothing downstream hardcodes
/// the online term per metric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Keep only records whose power state is the exact online literal.
    pub online_only: bool,
    /// Keep only records with this exact owner.
    pub owner: Option<String>,
    /// Keep only records with this exact purpose.
    pub purpose: Option<String>,
}

impl RecordFilter {
    /// No constraints: every record passes.
    pub fn all() -> Self {
        Self::default()
    }

    /// Online machines only.
    pub fn online() -> Self {
        RecordFilter {
            online_only: true,
            ..Self::default()
        }
    }

    /// Add an owner equality term. Used for "one owner's breakdown by
    /// purpose" queries, which are ordinary aggregations over this filter.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Add a purpose equality term.
    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    /// Whether `record` passes every active term.
    pub fn matches(&self, record: &VmRecord) -> bool {
        if self.online_only && !record.is_online() {
            return false;
        }
        if let Some(owner) = &self.owner {
            if record.owner.as_deref() != Some(owner.as_str()) {
                return false;
            }
        }
        if let Some(purpose) = &self.purpose {
            if record.purpose.as_deref() != Some(purpose.as_str()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::POWERED_ON;

    fn rec(owner: Option<&str>, purpose: Option<&str>, state: &str) -> VmRecord {
        VmRecord {
            owner: owner.map(str::to_string),
            purpose: purpose.map(str::to_string),
            memory_gb: 0.0,
            storage_gb: 0.0,
            power_state: state.to_string(),
        }
    }

    #[test]
    fn all_passes_everything() {
        let f = RecordFilter::all();
        assert!(f.matches(&rec(Some("bob"), Some("db"), POWERED_ON)));
        assert!(f.matches(&rec(None, None, "powered-off")));
    }

    #[test]
    fn online_only_excludes_other_states() {
        let f = RecordFilter::online();
        assert!(f.matches(&rec(Some("bob"), None, POWERED_ON)));
        assert!(!f.matches(&rec(Some("bob"), None, "powered-off")));
        assert!(!f.matches(&rec(Some("bob"), None, "suspended")));
    }

    #[test]
    fn equality_terms_stack_on_online() {
        let f = RecordFilter::online().with_owner("bob");
        assert!(f.matches(&rec(Some("bob"), Some("db"), POWERED_ON)));
        assert!(!f.matches(&rec(Some("amy"), Some("db"), POWERED_ON)));
        assert!(!f.matches(&rec(Some("bob"), Some("db"), "powered-off")));
        // A record with no owner never matches an owner term.
        assert!(!f.matches(&rec(None, Some("db"), POWERED_ON)));
    }

    #[test]
    fn purpose_term() {
        let f = RecordFilter::all().with_purpose("db");
        assert!(f.matches(&rec(Some("amy"), Some("db"), "powered-off")));
        assert!(!f.matches(&rec(Some("amy"), Some("web"), POWERED_ON)));
        assert!(!f.matches(&rec(Some("amy"), None, POWERED_ON)));
    }
}
