//! Write-once strategy registry.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use thiserror::Error;

/// Raised when startup code tries to populate a registry twice.
///
/// Never expected in correct operation; callers treat it as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitializationError {
    #[error("Trying to overwrite the already-populated {0} registry")]
    RegistryOverwrite(&'static str),
}

/// Mapping from policy identifier to strategy, populated exactly once.
///
/// Reads before population behave like an empty registry.
#[derive(Debug)]
pub struct Registry<K, V> {
    name: &'static str,
    entries: OnceLock<BTreeMap<K, V>>,
}

impl<K: Ord, V> Registry<K, V> {
    /// Create an unpopulated registry. `name` is used in error messages.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: OnceLock::new(),
        }
    }

    /// Populate the registry in one step.
    ///
    /// Fails on every call after the first, whatever either call contained.
    pub fn set(&self, entries: BTreeMap<K, V>) -> Result<(), InitializationError> {
        self.entries
            .set(entries)
            .map_err(|_| InitializationError::RegistryOverwrite(self.name))
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get()?.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.get().map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Loaded identifiers, in key order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Copy,
    {
        self.entries
            .get()
            .map(|entries| entries.keys().copied().collect())
            .unwrap_or_default()
    }
}
