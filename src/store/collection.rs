//! Cached per-entity-type collection state.

use std::collections::HashMap;

/// Cache state of one entity type.
///
/// Lifecycle: `uninitialized → loading → initialized` (success or error);
/// a forced load re-enters `loading` from either terminal state.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    /// Cached rows in load/insert order.
    pub items: Vec<T>,

    /// Field name → allowed values, populated for picklist-backed types.
    pub picklists: HashMap<String, Vec<String>>,

    /// Whether a load has ever completed (successfully or not).
    pub initialized: bool,

    /// Whether a load is currently in flight.
    pub loading: bool,

    /// Message of the last failed load, cleared by the next attempt.
    pub error: Option<String>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            picklists: HashMap::new(),
            initialized: false,
            loading: false,
            error: None,
        }
    }
}

impl<T> Collection<T> {
    /// True when nothing has ever touched this collection.
    pub(crate) fn is_pristine(&self) -> bool {
        !self.initialized && !self.loading && self.items.is_empty() && self.error.is_none()
    }
}
