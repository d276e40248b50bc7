use std::sync::{Arc, RwLock};

use crate::data::model::VmDataset;

// ---------------------------------------------------------------------------
// Single-generation dataset holder
// ---------------------------------------------------------------------------

/// Holds the one active dataset generation.
///
/// A new upload replaces the generation wholesale: `install` swaps the
/// shared reference under a write lock, so a query observes either the old
/// dataset in full or the new one in full, never a mix. Datasets are
/// immutable once built, so readers need nothing beyond the `Arc` clone
/// handed out by `snapshot` and may run concurrently with each other.
#[derive(Debug)]
pub struct InventoryStore {
    current: RwLock<Arc<VmDataset>>,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore {
    /// Start with an empty generation (queries return empty results).
    pub fn new() -> Self {
        InventoryStore {
            current: RwLock::new(Arc::new(VmDataset::default())),
        }
    }

    /// Atomically replace the active generation. The previous generation
    /// is dropped once its last snapshot goes away.
    pub fn install(&self, dataset: VmDataset) {
        let mut current = self.current.write().expect("store lock poisoned");
        *current = Arc::new(dataset);
    }

    /// A handle to the current generation, stable for the whole query even
    /// if a replacement lands concurrently.
    pub fn snapshot(&self) -> Arc<VmDataset> {
        Arc::clone(&self.current.read().expect("store lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{VmRecord, POWERED_ON};

    fn dataset(n: usize) -> VmDataset {
        VmDataset::from_records(
            (0..n)
                .map(|i| VmRecord {
                    owner: Some(format!("owner{i}")),
                    purpose: Some("db".to_string()),
                    memory_gb: 1.0,
                    storage_gb: 1.0,
                    power_state: POWERED_ON.to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn starts_empty() {
        let store = InventoryStore::new();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn install_replaces_wholesale() {
        let store = InventoryStore::new();
        store.install(dataset(3));
        assert_eq!(store.snapshot().len(), 3);
        store.install(dataset(1));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn snapshot_survives_replacement() {
        let store = InventoryStore::new();
        store.install(dataset(3));
        let old = store.snapshot();
        store.install(dataset(5));
        // The old handle still sees its own generation in full.
        assert_eq!(old.len(), 3);
        assert_eq!(store.snapshot().len(), 5);
    }
}
