// src/ledger.rs

use std::{
    sync::{Arc, Mutex, MutexGuard},
    thread,
    time::Duration,
};

use indexmap::IndexSet;

use crate::{
    constants::{REVERT_LIST_DELIMITER, REVERT_LIST_KEY},
    errors::LedgerError,
    settings::SettingsStore,
};

const DEFAULT_PERSIST_ATTEMPTS: u32 = 3;
const PERSIST_RETRY_DELAY: Duration = Duration::from_millis(25);

/// Splits a persisted revert list. Empty and repeated segments are dropped.
pub fn parse_revert_list(raw: &str) -> IndexSet<String> {
    raw.split(REVERT_LIST_DELIMITER)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn format_revert_list(entries: &IndexSet<String>) -> String {
    let mut raw = String::new();
    for (i, name) in entries.iter().enumerate() {
        if i > 0 {
            raw.push(REVERT_LIST_DELIMITER);
        }
        raw.push_str(name);
    }
    raw
}

/// Persisted, insertion-ordered set of revert action names that are still pending.
///
/// Every mutation is written through to the store before it returns, and the
/// read-modify-write cycle runs under one lock so concurrent callers never lose
/// each other's updates.
pub struct RevertLedger {
    store: Arc<dyn SettingsStore>,
    persist_attempts: u32,
    lock: Mutex<()>,
}

impl RevertLedger {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self {
            store,
            persist_attempts: DEFAULT_PERSIST_ATTEMPTS,
            lock: Mutex::new(()),
        }
    }

    pub fn with_persist_attempts(mut self, attempts: u32) -> Self {
        self.persist_attempts = attempts.max(1);
        self
    }

    /// Records `name`. Returns whether it was newly added.
    ///
    /// Names must survive a persist and reload unchanged, so empty names, names
    /// with surrounding whitespace and names containing the delimiter are rejected.
    pub fn add(&self, name: &str) -> Result<bool, LedgerError> {
        if name.is_empty() || name.trim() != name || name.contains(REVERT_LIST_DELIMITER) {
            return Err(LedgerError::InvalidActionName(name.to_string()));
        }
        let _guard = self.guard();
        let mut entries = self.load()?;
        if !entries.insert(name.to_string()) {
            return Ok(false);
        }
        self.persist(&entries)?;
        tracing::debug!("{} -> Added to revert list.", name);
        Ok(true)
    }

    /// Drops `name`. Returns whether it was present.
    pub fn remove(&self, name: &str) -> Result<bool, LedgerError> {
        let _guard = self.guard();
        let mut entries = self.load()?;
        if !entries.shift_remove(name) {
            return Ok(false);
        }
        self.persist(&entries)?;
        tracing::debug!("{} -> Removed from revert list.", name);
        Ok(true)
    }

    /// Drops every name in `names` with a single write. Returns how many were present.
    pub fn remove_all<'a, I>(&self, names: I) -> Result<usize, LedgerError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let _guard = self.guard();
        let mut entries = self.load()?;
        let removed = names
            .into_iter()
            .filter(|name| entries.shift_remove(*name))
            .count();
        if removed > 0 {
            self.persist(&entries)?;
        }
        Ok(removed)
    }

    /// Respells entries for which `rename` returns a new name, keeping their
    /// position. Returns how many entries changed.
    pub fn rename_entries<F>(&self, rename: F) -> Result<usize, LedgerError>
    where
        F: Fn(&str) -> Option<&'static str>,
    {
        let _guard = self.guard();
        let entries = self.load()?;
        let mut renamed = 0;
        let entries: IndexSet<String> = entries
            .into_iter()
            .map(|name| match rename(name.as_str()) {
                Some(new_name) if new_name != name => {
                    tracing::debug!("{} -> Renamed to {} in revert list.", name, new_name);
                    renamed += 1;
                    new_name.to_string()
                }
                _ => name,
            })
            .collect();
        if renamed > 0 {
            self.persist(&entries)?;
        }
        Ok(renamed)
    }

    pub fn clear(&self) -> Result<(), LedgerError> {
        let _guard = self.guard();
        self.persist(&IndexSet::new())
    }

    pub fn contains(&self, name: &str) -> Result<bool, LedgerError> {
        let _guard = self.guard();
        Ok(self.load()?.contains(name))
    }

    /// Pending revert actions in the order they were recorded.
    pub fn list_all(&self) -> Result<Vec<String>, LedgerError> {
        let _guard = self.guard();
        Ok(self.load()?.into_iter().collect())
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn load(&self) -> Result<IndexSet<String>, LedgerError> {
        let raw = self.store.get(REVERT_LIST_KEY).map_err(LedgerError::Load)?;
        Ok(raw.as_deref().map(parse_revert_list).unwrap_or_default())
    }

    fn persist(&self, entries: &IndexSet<String>) -> Result<(), LedgerError> {
        let raw = format_revert_list(entries);
        let mut attempt = 1;
        loop {
            match self.store.set(REVERT_LIST_KEY, &raw) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.persist_attempts => {
                    tracing::warn!(
                        "Failed to save revert list (attempt {}/{}): {:#}",
                        attempt,
                        self.persist_attempts,
                        e
                    );
                    attempt += 1;
                    thread::sleep(PERSIST_RETRY_DELAY);
                }
                Err(source) => {
                    tracing::error!("Giving up on saving revert list: {:#}", source);
                    return Err(LedgerError::Persist {
                        attempts: attempt,
                        source,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::settings::MemoryStore;

    /// Wraps a `MemoryStore` and fails the first `failures` writes.
    #[derive(Default)]
    pub struct FlakyStore {
        pub inner: MemoryStore,
        pub failures: AtomicU32,
        pub writes: AtomicU32,
    }

    impl FlakyStore {
        pub fn failing(failures: u32) -> Self {
            Self {
                failures: AtomicU32::new(failures),
                ..Default::default()
            }
        }
    }

    impl SettingsStore for FlakyStore {
        fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let left = self.failures.load(Ordering::SeqCst);
            if left > 0 {
                self.failures.store(left - 1, Ordering::SeqCst);
                anyhow::bail!("disk full");
            }
            self.inner.set(key, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::atomic::Ordering};

    use super::{testing::FlakyStore, *};
    use crate::settings::MemoryStore;

    fn ledger() -> (Arc<MemoryStore>, RevertLedger) {
        let store = Arc::new(MemoryStore::default());
        (store.clone(), RevertLedger::new(store))
    }

    #[test]
    fn test_parse_two_entries() {
        let entries = parse_revert_list("EnableCortana|EnableSysMain");
        assert_eq!(
            entries.iter().cloned().collect::<Vec<_>>(),
            vec!["EnableCortana".to_string(), "EnableSysMain".to_string()]
        );

        let reversed = parse_revert_list("EnableSysMain|EnableCortana");
        let as_set = |set: IndexSet<String>| set.into_iter().collect::<HashSet<_>>();
        assert_eq!(as_set(reversed), as_set(entries));
    }

    #[test]
    fn test_parse_skips_empty_and_repeated_segments() {
        let entries = parse_revert_list("|EnableCortana||EnableSysMain|EnableCortana|");
        assert_eq!(entries.len(), 2);
        assert!(parse_revert_list("").is_empty());
    }

    #[test]
    fn test_format_round_trip() {
        let entries = parse_revert_list("A|B|C");
        assert_eq!(format_revert_list(&entries), "A|B|C");
    }

    #[test]
    fn test_add_survives_reload() {
        let (store, ledger) = ledger();
        assert!(ledger.add("EnableSysMain").unwrap());
        drop(ledger);

        let reloaded = RevertLedger::new(store.clone());
        assert_eq!(reloaded.list_all().unwrap(), vec!["EnableSysMain".to_string()]);
        assert_eq!(
            store.get(REVERT_LIST_KEY).unwrap().as_deref(),
            Some("EnableSysMain")
        );
    }

    #[test]
    fn test_add_twice_keeps_one() {
        let (_, ledger) = ledger();
        assert!(ledger.add("EnableCortana").unwrap());
        assert!(!ledger.add("EnableCortana").unwrap());
        assert_eq!(ledger.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_add_then_remove() {
        let (_, ledger) = ledger();
        ledger.add("EnableCortana").unwrap();
        assert!(ledger.remove("EnableCortana").unwrap());
        assert!(!ledger.remove("EnableCortana").unwrap());
        assert!(!ledger.contains("EnableCortana").unwrap());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let (_, ledger) = ledger();
        for name in ["EnableSearch", "EnableCortana", "EnableSysMain"] {
            ledger.add(name).unwrap();
        }
        ledger.remove("EnableCortana").unwrap();
        ledger.add("EnableCortana").unwrap();
        assert_eq!(
            ledger.list_all().unwrap(),
            vec!["EnableSearch", "EnableSysMain", "EnableCortana"]
        );
    }

    #[test]
    fn test_rejects_invalid_names() {
        let (_, ledger) = ledger();
        assert!(matches!(ledger.add(""), Err(LedgerError::InvalidActionName(_))));
        assert!(matches!(ledger.add("A|B"), Err(LedgerError::InvalidActionName(_))));
        assert!(ledger.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_names_with_surrounding_whitespace() {
        let (_, ledger) = ledger();
        for name in [" EnableSysMain", "EnableSysMain ", "\tEnableSysMain"] {
            assert!(matches!(ledger.add(name), Err(LedgerError::InvalidActionName(_))));
        }
        assert!(ledger.list_all().unwrap().is_empty());

        // Every accepted name is found again after the reload inside `contains`.
        assert!(ledger.add("EnableSysMain").unwrap());
        assert!(ledger.contains("EnableSysMain").unwrap());
        assert!(ledger.remove("EnableSysMain").unwrap());
    }

    #[test]
    fn test_remove_all_writes_once() {
        let store = Arc::new(FlakyStore::default());
        let ledger = RevertLedger::new(store.clone());
        for name in ["A", "B", "C"] {
            ledger.add(name).unwrap();
        }
        let before = store.writes.load(Ordering::SeqCst);

        assert_eq!(ledger.remove_all(["A", "C", "Missing"]).unwrap(), 2);
        assert_eq!(store.writes.load(Ordering::SeqCst), before + 1);
        assert_eq!(ledger.list_all().unwrap(), vec!["B"]);

        ledger.clear().unwrap();
        assert!(ledger.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_rename_keeps_position_and_merges_duplicates() {
        let (store, ledger) = ledger();
        for name in ["Old", "EnableCortana", "New"] {
            ledger.add(name).unwrap();
        }

        let renamed = ledger
            .rename_entries(|name| (name == "Old").then_some("New"))
            .unwrap();
        assert_eq!(renamed, 1);
        assert_eq!(ledger.list_all().unwrap(), vec!["New", "EnableCortana"]);
        assert_eq!(
            store.get(REVERT_LIST_KEY).unwrap().as_deref(),
            Some("New|EnableCortana")
        );
        assert_eq!(ledger.rename_entries(|_| None).unwrap(), 0);
    }

    #[test]
    fn test_persist_retries_then_succeeds() {
        let store = Arc::new(FlakyStore::failing(2));
        let ledger = RevertLedger::new(store.clone()).with_persist_attempts(3);
        assert!(ledger.add("EnableSysMain").unwrap());
        assert_eq!(store.writes.load(Ordering::SeqCst), 3);
        assert!(ledger.contains("EnableSysMain").unwrap());
    }

    #[test]
    fn test_persist_failure_is_surfaced() {
        let store = Arc::new(FlakyStore::failing(u32::MAX));
        let ledger = RevertLedger::new(store).with_persist_attempts(2);
        match ledger.add("EnableSysMain") {
            Err(LedgerError::Persist { attempts, .. }) => assert_eq!(attempts, 2),
            other => panic!("expected a persist error, got {:?}", other),
        }
        assert!(!ledger.contains("EnableSysMain").unwrap());
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let (_, ledger) = ledger();
        let ledger = Arc::new(ledger);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    for j in 0..10 {
                        ledger.add(&format!("Action{}_{}", i, j)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.list_all().unwrap().len(), 80);
    }
}
