//! Stamp progress and its persistence.
//!
//! Progress is a set of checkpoint ids. It is written as a JSON array of
//! integers under [`STORAGE_KEY`] after every stamp and read back once at
//! startup. Reads never fail: anything unreadable is treated as "no stamps".
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::convert::Infallible;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CheckpointId};
use crate::constants::STORAGE_KEY;

/// Set of stamped checkpoint ids. Membership only; order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StampSet(BTreeSet<CheckpointId>);

impl StampSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: CheckpointId) -> bool {
        self.0.contains(&id)
    }

    /// Number of stamps collected.
    #[must_use]
    pub fn count(&self) -> u32 {
        u32::try_from(self.0.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Union with `{id}`. Adding a present id returns an equal set.
    #[must_use]
    pub fn with(&self, id: CheckpointId) -> Self {
        let mut next = self.0.clone();
        next.insert(id);
        Self(next)
    }

    /// Drop ids the catalog does not know about.
    #[must_use]
    pub fn retain_known(mut self, catalog: &Catalog) -> Self {
        self.0.retain(|id| catalog.contains(*id));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = CheckpointId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<CheckpointId> for StampSet {
    fn from_iter<T: IntoIterator<Item = CheckpointId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Key/value persistence backing a [`ProgressStore`].
///
/// Platform-specific implementations should provide this (browser
/// `localStorage` on the web, [`MemoryStorage`] in tests and the tester).
pub trait ProgressStorage {
    type Error: std::error::Error + 'static;

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be accessed.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Replace the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, for inspection.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Overwrite a raw value, e.g. to simulate corrupt data.
    pub fn put_raw(&self, key: &str, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.to_string(), value.into());
    }
}

impl ProgressStorage for MemoryStorage {
    type Error = Infallible;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.put_raw(key, value);
        Ok(())
    }
}

/// Loads and saves [`StampSet`]s through a [`ProgressStorage`].
#[derive(Debug, Clone)]
pub struct ProgressStore<S> {
    storage: S,
    key: String,
}

impl<S: ProgressStorage> ProgressStore<S> {
    /// Store using the application's fixed key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read persisted progress. Missing, unreadable, or corrupt data yields
    /// an empty set.
    #[must_use]
    pub fn load(&self) -> StampSet {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return StampSet::new(),
            Err(err) => {
                log::warn!("progress read failed for {}: {err}", self.key);
                return StampSet::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!("discarding unparsable progress under {}: {err}", self.key);
            StampSet::new()
        })
    }

    /// Record `id` on top of `current` and persist the result before
    /// returning it. A failed write is logged; the returned set still
    /// contains the new stamp.
    #[must_use]
    pub fn mark_stamped(&self, current: &StampSet, id: CheckpointId) -> StampSet {
        let next = current.with(id);
        self.persist(&next);
        next
    }

    /// Write `stamps` under the store key.
    pub fn persist(&self, stamps: &StampSet) {
        let payload = match serde_json::to_string(stamps) {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("progress serialization failed: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.write(&self.key, &payload) {
            log::warn!("progress write failed for {}: {err}", self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("quota exceeded")]
    struct QuotaExceeded;

    struct BrokenStorage;

    impl ProgressStorage for BrokenStorage {
        type Error = QuotaExceeded;

        fn read(&self, _key: &str) -> Result<Option<String>, Self::Error> {
            Err(QuotaExceeded)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), Self::Error> {
            Err(QuotaExceeded)
        }
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = ProgressStore::new(MemoryStorage::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn mark_stamped_persists_sorted_json_array() {
        let storage = MemoryStorage::new();
        let store = ProgressStore::new(storage.clone());
        let once = store.mark_stamped(&StampSet::new(), 5);
        let twice = store.mark_stamped(&once, 2);
        assert_eq!(storage.raw(STORAGE_KEY).as_deref(), Some("[2,5]"));
        assert_eq!(store.load(), twice);
    }

    #[test]
    fn mark_stamped_is_idempotent() {
        let store = ProgressStore::new(MemoryStorage::new());
        let once = store.mark_stamped(&StampSet::new(), 3);
        let again = store.mark_stamped(&once, 3);
        assert_eq!(once, again);
        assert_eq!(again.count(), 1);
    }

    #[test]
    fn corrupt_values_load_empty() {
        let storage = MemoryStorage::new();
        let store = ProgressStore::new(storage.clone());
        for raw in ["not json", "{\"a\":1}", "[1, -2]", "[1.5]", ""] {
            storage.put_raw(STORAGE_KEY, raw);
            assert!(store.load().is_empty(), "{raw:?} should load empty");
        }
    }

    #[test]
    fn unsorted_duplicate_arrays_still_load() {
        let storage = MemoryStorage::new();
        storage.put_raw(STORAGE_KEY, "[3,1,3]");
        let loaded = ProgressStore::new(storage).load();
        assert_eq!(loaded.iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn broken_storage_fails_soft() {
        let store = ProgressStore::new(BrokenStorage);
        assert!(store.load().is_empty());
        let stamped = store.mark_stamped(&StampSet::new(), 1);
        assert!(stamped.contains(1));
    }

    #[test]
    fn retain_known_drops_stale_ids() {
        let catalog = Catalog::load_from_static().unwrap();
        let set: StampSet = [1, 2, 404].into_iter().collect();
        let kept = set.retain_known(&catalog);
        assert_eq!(kept.iter().collect::<Vec<_>>(), vec![1, 2]);
    }
}
