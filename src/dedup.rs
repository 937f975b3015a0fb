use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Hashes of transactions that were already announced.
///
/// Entries are never evicted; the set lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct NotifiedSet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl NotifiedSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.lock().contains(hash)
    }

    /// Returns `false` if the hash was already present.
    pub fn insert(&self, hash: &str) -> bool {
        self.lock().insert(hash.to_string())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }
}
