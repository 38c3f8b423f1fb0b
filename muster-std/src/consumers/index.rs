//! Merged implementor index.

use muster_core::{BoxError, Consumer, FragmentPayload, GroupKey, Implementor};
use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

#[derive(Default)]
struct IndexState {
    groups: BTreeMap<GroupKey, Vec<Implementor>>,
    payloads: usize,
}

/// A consumer that merges every delivered payload into one page-wide view.
///
/// Merge policy: when several payloads carry the same group, their
/// implementor sequences are appended in delivery order. A sequence is never
/// interleaved with another one, reordered or truncated.
///
/// Clones share the same index, so keep one clone for reading and install
/// the other.
///
/// # Example
///
/// ```rust,ignore
/// let index = ImplementorIndex::new();
/// registry.install(index.clone())?;
///
/// let series = index.group("polars_core");
/// ```
#[derive(Clone, Default)]
pub struct ImplementorIndex {
    state: Arc<RwLock<IndexState>>,
}

impl ImplementorIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Implementors of one group, in merged order.
    pub fn group(&self, key: &str) -> Option<Vec<Implementor>> {
        self.read().groups.get(key).cloned()
    }

    /// All group keys seen so far, sorted.
    pub fn groups(&self) -> Vec<GroupKey> {
        self.read().groups.keys().cloned().collect()
    }

    /// Total implementors across every group.
    pub fn implementor_count(&self) -> usize {
        self.read().groups.values().map(Vec::len).sum()
    }

    /// Number of payloads merged.
    pub fn payloads_received(&self) -> usize {
        self.read().payloads
    }

    /// Whether nothing has been merged yet.
    pub fn is_empty(&self) -> bool {
        self.read().payloads == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Consumer<FragmentPayload> for ImplementorIndex {
    fn consume(&self, payload: FragmentPayload) -> Result<(), BoxError> {
        let mut state = self.write();
        for (key, implementors) in payload {
            state.groups.entry(key).or_default().extend(implementors);
        }
        state.payloads += 1;
        Ok(())
    }
}

impl std::fmt::Debug for ImplementorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("ImplementorIndex")
            .field("groups", &state.groups.len())
            .field("payloads", &state.payloads)
            .finish()
    }
}
