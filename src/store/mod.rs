//! Synchronous key/value store that survives across sessions.
//!
//! Holds the serialized reference lists (`list_a`, `list_c`, `list_i`) and the
//! `nightMode` display flag. Two backends are provided: [`FileStore`] for real
//! devices and [`MemoryStore`] for tests and embedders that manage persistence
//! themselves.

mod file;

use std::collections::HashMap;
use std::sync::Mutex;

pub use file::FileStore;

/// What: Key/value persistence seam used by the reference cache and display-mode handling.
///
/// Details:
/// - Calls are synchronous and expected to be cheap (small text values).
/// - `get` returns `None` for missing keys and for unreadable entries; callers treat both as absent.
pub trait PersistentStore: Send + Sync + 'static {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// - Backend-specific I/O failures
    fn set(&self, key: &str, value: &str) -> std::io::Result<()>;
}

/// In-process store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Stored entries.
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| std::io::Error::other("memory store lock poisoned"))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStore, PersistentStore};

    #[test]
    /// What: Memory store reads back what was written and reports missing keys as absent.
    ///
    /// Inputs:
    /// - A store seeded with `nightMode = 0`, then a write to `list_a`.
    ///
    /// Output:
    /// - Both keys read back; an unknown key yields `None`.
    fn memory_store_get_set() {
        let store = MemoryStore::with_entries([("nightMode", "0")]);
        assert_eq!(store.get("nightMode").as_deref(), Some("0"));
        store.set("list_a", "{\"meals\":[]}").expect("write succeeds");
        assert_eq!(store.get("list_a").as_deref(), Some("{\"meals\":[]}"));
        assert_eq!(store.get("list_i"), None);
    }
}
