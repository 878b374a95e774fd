//! Snapshot store for the working customization.

use crate::scene::model::CustomizationSpec;
use crate::scene::patch::Patch;
use std::fmt;
use std::sync::Arc;

/// Handle returned by [`CustomizationStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Arc<CustomizationSpec>)>;

/// Holds the current [`CustomizationSpec`] snapshot.
///
/// Snapshots are shared as `Arc` and never mutated: every change builds a new spec, swaps it in and
/// notifies subscribers synchronously, in subscription order.
pub struct CustomizationStore {
    current: Arc<CustomizationSpec>,
    revision: u64,
    next_subscription: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl CustomizationStore {
    /// Create a store seeded with `spec`.
    pub fn new(spec: CustomizationSpec) -> Self {
        Self {
            current: Arc::new(spec),
            revision: 0,
            next_subscription: 0,
            listeners: Vec::new(),
        }
    }

    /// Current immutable snapshot.
    pub fn config(&self) -> Arc<CustomizationSpec> {
        Arc::clone(&self.current)
    }

    /// Number of committed changes since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Merge `patch` into a new snapshot, commit it and notify subscribers.
    ///
    /// The previous snapshot is left untouched and the returned `Arc` never aliases it.
    pub fn apply_patch(&mut self, patch: &Patch) -> Arc<CustomizationSpec> {
        let next = Arc::new(patch.apply_to(&self.current));
        tracing::debug!(
            revision = self.revision + 1,
            paths = ?patch.touched_roots(),
            "apply patch"
        );
        self.commit(next)
    }

    /// Replace the whole working configuration (template application, loading).
    pub fn replace(&mut self, spec: CustomizationSpec) -> Arc<CustomizationSpec> {
        tracing::debug!(revision = self.revision + 1, "replace configuration");
        self.commit(Arc::new(spec))
    }

    /// Register a listener invoked after every committed change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<CustomizationSpec>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, next: Arc<CustomizationSpec>) -> Arc<CustomizationSpec> {
        self.current = next;
        self.revision += 1;
        for (_, listener) in &mut self.listeners {
            listener(&self.current);
        }
        Arc::clone(&self.current)
    }
}

impl Default for CustomizationStore {
    fn default() -> Self {
        Self::new(CustomizationSpec::default())
    }
}

impl fmt::Debug for CustomizationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomizationStore")
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/store.rs"]
mod tests;
