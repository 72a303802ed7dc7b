use alloc::borrow::ToOwned;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::*;

/// Key the best result is persisted under.
pub const BEST_RESULT_KEY: &str = "memory-game-best-result";

/// Where the best result lives between sessions. Neither operation can fail from the
/// caller's point of view: a store that cannot read has no best result, a store that cannot
/// write keeps quiet.
pub trait BestResultStore {
    fn load(&mut self) -> Option<BestResult>;
    fn save(&mut self, result: BestResult);
}

/// String key/value backend, shaped after the browser's `localStorage`.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> core::result::Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> core::result::Result<(), StorageError>;
}

/// Best result stored as JSON in a [`KeyValueStorage`].
#[derive(Clone, Debug, Default)]
pub struct PersistentBest<S> {
    storage: S,
}

impl<S: KeyValueStorage> PersistentBest<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read(&self) -> core::result::Result<Option<BestResult>, StorageError> {
        let Some(raw) = self.storage.get_item(BEST_RESULT_KEY)? else {
            return Ok(None);
        };
        let best: BestResult = serde_json::from_str(&raw)?;
        if best.is_plausible() {
            Ok(Some(best))
        } else {
            log::warn!("Ignoring stored best result with no moves: {:?}", best);
            Ok(None)
        }
    }

    fn write(&mut self, result: BestResult) -> core::result::Result<(), StorageError> {
        let raw = serde_json::to_string(&result)?;
        self.storage.set_item(BEST_RESULT_KEY, &raw)
    }
}

impl<S: KeyValueStorage> BestResultStore for PersistentBest<S> {
    fn load(&mut self) -> Option<BestResult> {
        self.read().unwrap_or_else(|err| {
            log::warn!("Could not read best result: {}", err);
            None
        })
    }

    fn save(&mut self, result: BestResult) {
        if let Err(err) = self.write(result) {
            log::warn!("Could not save best result: {}", err);
        }
    }
}

/// In-process storage. Failures can be switched on to stand in for a browser in private
/// mode or over quota.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> core::result::Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable);
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> core::result::Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Backend("quota exceeded".to_string()));
        }
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Keeps the best result for the lifetime of the value only.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NoPersistence {
    best: Option<BestResult>,
}

impl BestResultStore for NoPersistence {
    fn load(&mut self) -> Option<BestResult> {
        self.best
    }

    fn save(&mut self, result: BestResult) {
        self.best = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_means_no_best() {
        let mut store = PersistentBest::new(MemoryStorage::new());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn saved_record_loads_back() {
        let mut store = PersistentBest::new(MemoryStorage::new());

        store.save(BestResult::new(9, 41));

        assert_eq!(store.load(), Some(BestResult::new(9, 41)));
        assert_eq!(
            store.storage().item(BEST_RESULT_KEY),
            Some(r#"{"moves":9,"seconds":41}"#)
        );
    }

    #[test]
    fn last_write_wins() {
        let mut store = PersistentBest::new(MemoryStorage::new());

        store.save(BestResult::new(12, 80));
        store.save(BestResult::new(10, 95));

        assert_eq!(store.load(), Some(BestResult::new(10, 95)));
    }

    #[test]
    fn read_failure_is_absent() {
        let storage = MemoryStorage::new()
            .with_item(BEST_RESULT_KEY, r#"{"moves":3,"seconds":4}"#)
            .failing_reads();
        let mut store = PersistentBest::new(storage);

        assert_eq!(store.load(), None);
    }

    #[test]
    fn write_failure_is_swallowed() {
        let mut store = PersistentBest::new(MemoryStorage::new().failing_writes());

        store.save(BestResult::new(8, 20));

        assert_eq!(store.storage().item(BEST_RESULT_KEY), None);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn corrupt_records_are_absent() {
        for raw in [
            "not json",
            r#"{"moves":"many"}"#,
            r#"{"moves":0,"seconds":12}"#,
            "null",
        ] {
            let storage = MemoryStorage::new().with_item(BEST_RESULT_KEY, raw);
            let mut store = PersistentBest::new(storage);
            assert_eq!(store.load(), None, "record {raw:?} should be ignored");
        }
    }

    #[test]
    fn unpersisted_store_remembers_in_memory() {
        let mut store = NoPersistence::default();
        assert_eq!(store.load(), None);

        store.save(BestResult::new(6, 7));
        assert_eq!(store.load(), Some(BestResult::new(6, 7)));
    }
}
