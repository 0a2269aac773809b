//! Persistent unlock progress, written through on every mutation.
use std::collections::BTreeMap;

use crate::constants::PROGRESS_STORAGE_KEY;

/// Backend for the persisted progress snapshot.
///
/// Implementations must be synchronous and durable by the time a call
/// returns; the store relies on that to guarantee a reload after any
/// mutation observes it.
pub trait ProgressStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw snapshot stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Replace the raw snapshot stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove the snapshot stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProgressError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error("progress backend failure: {0}")]
    Backend(E),
    #[error("progress snapshot could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Write-through mapping from stop id to unlocked flag.
///
/// Absent key means locked. The full snapshot is persisted as one JSON
/// object before any mutating call returns, so the store never holds
/// unpersisted state. Keys for stops no longer in the catalog are kept
/// as-is; they are harmless and disappear on reset.
#[derive(Debug, Clone)]
pub struct ProgressStore<S: ProgressStorage> {
    backend: S,
    unlocked: BTreeMap<String, bool>,
}

impl<S: ProgressStorage> ProgressStore<S> {
    /// Hydrate the store from its backend. A corrupt snapshot is treated
    /// as empty progress rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend itself cannot be read.
    pub fn load(backend: S) -> Result<Self, ProgressError<S::Error>> {
        let unlocked = match backend.get(PROGRESS_STORAGE_KEY).map_err(ProgressError::Backend)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            None => BTreeMap::new(),
        };
        Ok(Self { backend, unlocked })
    }

    #[must_use]
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.get(id).copied().unwrap_or(false)
    }

    /// Mark a stop unlocked. Idempotent; persisted before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn unlock(&mut self, id: &str) -> Result<(), ProgressError<S::Error>> {
        self.unlocked.insert(id.to_string(), true);
        self.persist()
    }

    /// Relock a single stop. Persisted before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn clear(&mut self, id: &str) -> Result<(), ProgressError<S::Error>> {
        self.unlocked.remove(id);
        self.persist()
    }

    /// Drop all progress, removing the snapshot from the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn reset_all(&mut self) -> Result<(), ProgressError<S::Error>> {
        self.unlocked.clear();
        self.backend
            .remove(PROGRESS_STORAGE_KEY)
            .map_err(ProgressError::Backend)
    }

    #[must_use]
    pub fn count_unlocked(&self) -> usize {
        self.unlocked.values().filter(|unlocked| **unlocked).count()
    }

    /// Unlocked share of `total` as a whole percentage in `0..=100`.
    /// An empty trail reports zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent_unlocked(&self, total: usize) -> u8 {
        if total == 0 {
            return 0;
        }
        let pct = self.count_unlocked() as f64 / total as f64 * 100.0;
        pct.round().min(100.0) as u8
    }

    fn persist(&self) -> Result<(), ProgressError<S::Error>> {
        let raw = serde_json::to_string(&self.unlocked)?;
        self.backend
            .set(PROGRESS_STORAGE_KEY, &raw)
            .map_err(ProgressError::Backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Debug, Default)]
    struct MemoryStorage {
        entries: Rc<RefCell<BTreeMap<String, String>>>,
    }

    impl ProgressStorage for MemoryStorage {
        type Error = Infallible;

        fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), Self::Error> {
            self.entries.borrow_mut().remove(key);
            Ok(())
        }
    }

    #[test]
    fn unlock_is_idempotent_and_counts_once() {
        let mut store = ProgressStore::load(MemoryStorage::default()).unwrap();
        store.unlock("a").unwrap();
        store.unlock("a").unwrap();
        assert_eq!(store.count_unlocked(), 1);
        assert!(store.is_unlocked("a"));
        assert!(!store.is_unlocked("b"));
    }

    #[test]
    fn every_mutation_is_visible_after_reload() {
        let backend = MemoryStorage::default();
        let mut store = ProgressStore::load(backend.clone()).unwrap();
        store.unlock("a").unwrap();
        store.unlock("b").unwrap();
        store.clear("b").unwrap();

        let reloaded = ProgressStore::load(backend).unwrap();
        assert!(reloaded.is_unlocked("a"));
        assert!(!reloaded.is_unlocked("b"));
        assert_eq!(reloaded.count_unlocked(), 1);
    }

    #[test]
    fn reset_all_removes_the_snapshot() {
        let backend = MemoryStorage::default();
        let mut store = ProgressStore::load(backend.clone()).unwrap();
        store.unlock("a").unwrap();
        store.reset_all().unwrap();
        assert_eq!(store.count_unlocked(), 0);
        assert!(backend.entries.borrow().is_empty());
    }

    #[test]
    fn percent_is_rounded_and_bounded() {
        let mut store = ProgressStore::load(MemoryStorage::default()).unwrap();
        assert_eq!(store.percent_unlocked(0), 0);
        assert_eq!(store.percent_unlocked(3), 0);
        store.unlock("a").unwrap();
        assert_eq!(store.percent_unlocked(3), 33);
        store.unlock("b").unwrap();
        assert_eq!(store.percent_unlocked(3), 67);
        store.unlock("c").unwrap();
        assert_eq!(store.percent_unlocked(3), 100);
        // Stale keys from removed stops are tolerated and never push the
        // percentage past 100.
        store.unlock("gone").unwrap();
        assert_eq!(store.percent_unlocked(3), 100);
    }

    #[test]
    fn corrupt_snapshot_starts_fresh() {
        let backend = MemoryStorage::default();
        backend.set("trailtag.progress", "{not json").unwrap();
        let store = ProgressStore::load(backend).unwrap();
        assert_eq!(store.count_unlocked(), 0);
    }
}
