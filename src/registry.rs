use crate::models::WatchedAddress;
use std::sync::{Arc, Mutex, MutexGuard};

/// Watched addresses in insertion order, shared between the bot and the poller.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    inner: Arc<Mutex<Vec<WatchedAddress>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<WatchedAddress>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert or rename. Re-adding keeps the original position.
    /// Returns `true` if the address was new.
    pub fn add(&self, address: &str, name: &str) -> bool {
        let key = address.to_lowercase();
        let mut entries = self.lock();
        match entries.iter_mut().find(|e| e.address == key) {
            Some(existing) => {
                existing.name = name.to_string();
                false
            }
            None => {
                entries.push(WatchedAddress {
                    address: key,
                    name: name.to_string(),
                });
                true
            }
        }
    }

    /// Copy of the current entries; the lock is released on return.
    pub fn snapshot(&self) -> Vec<WatchedAddress> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }
}
