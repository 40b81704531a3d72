// src/dispatcher.rs

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{debug, error, info};

use crate::{
    errors::{LedgerError, MutationError},
    ledger::RevertLedger,
    tweaks::{catalog::Catalog, method::ActionRunner},
};

/// One lock per toggle key, shared by the dispatcher and the revert executor so
/// that two operations on the same toggle never interleave.
pub struct KeyLocks {
    locks: HashMap<&'static str, Mutex<()>>,
    fallback: Mutex<()>,
}

impl KeyLocks {
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            locks: catalog.entries().map(|entry| (entry.key, Mutex::new(()))).collect(),
            fallback: Mutex::new(()),
        }
    }

    /// Keys outside the catalog share a single lock.
    pub fn lock(&self, key: &str) -> MutexGuard<'_, ()> {
        self.locks
            .get(key)
            .unwrap_or(&self.fallback)
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

/// Turns UI toggle changes into catalog actions and keeps the revert ledger in step.
pub struct ToggleDispatcher {
    catalog: Arc<Catalog>,
    runner: Arc<dyn ActionRunner>,
    ledger: Arc<RevertLedger>,
    locks: Arc<KeyLocks>,
}

impl ToggleDispatcher {
    pub fn new(
        catalog: Arc<Catalog>,
        runner: Arc<dyn ActionRunner>,
        ledger: Arc<RevertLedger>,
        locks: Arc<KeyLocks>,
    ) -> Self {
        Self {
            catalog,
            runner,
            ledger,
            locks,
        }
    }

    /// Runs the action for `desired_on` and records or clears the pending revert.
    ///
    /// If the action fails the ledger is left untouched.
    pub fn set_toggle(&self, key: &str, desired_on: bool) -> Result<(), MutationError> {
        let Some(entry) = self.catalog.lookup(key) else {
            error!("{} -> Unknown toggle.", key);
            return Err(MutationError::UnknownToggle(key.to_string()));
        };

        let _guard = self.locks.lock(entry.key);

        let action = entry.action_for(desired_on);
        info!("{} -> Running {}.", entry.key, action.name);
        self.runner.run(action).map_err(|source| {
            error!("{} -> {} failed: {:#}", entry.key, action.name, source);
            MutationError::MutationFailure {
                key: entry.key.to_string(),
                action: action.name.to_string(),
                source,
            }
        })?;

        // Legacy spellings of the revert name count as the same pending entry.
        let revert = entry.revert_action().name;
        let legacy: Vec<&str> = self.catalog.legacy_names(revert).collect();
        let ledger_result = if entry.leaves_default(desired_on) {
            self.ledger
                .add(revert)
                .and_then(|_| self.ledger.remove_all(legacy.iter().copied()))
        } else {
            self.ledger
                .remove_all(std::iter::once(revert).chain(legacy.iter().copied()))
        };
        ledger_result.map_err(|source| {
            error!("{} -> Failed to update revert list: {}", entry.key, source);
            MutationError::LedgerPersistFailure {
                key: entry.key.to_string(),
                source,
            }
        })?;

        debug!("{} -> Now {}.", entry.key, if desired_on { "on" } else { "off" });
        Ok(())
    }

    /// Live state of a toggle as implied by the revert ledger. `None` for unknown keys.
    pub fn current_state(&self, key: &str) -> Result<Option<bool>, LedgerError> {
        let Some(entry) = self.catalog.lookup(key) else {
            return Ok(None);
        };
        let revert = entry.revert_action().name;
        let pending = self
            .ledger
            .list_all()?
            .iter()
            .any(|name| self.catalog.action(name).map(|(_, action)| action.name) == Some(revert));
        Ok(Some(if pending {
            !entry.default_state
        } else {
            entry.default_state
        }))
    }

    /// Rewrites ledger entries left in a legacy spelling to the current action names.
    pub fn migrate_legacy_entries(&self) -> Result<usize, LedgerError> {
        let renamed = self
            .ledger
            .rename_entries(|name| self.catalog.canonical_action_name(name))?;
        if renamed > 0 {
            info!("Migrated {} legacy revert list entries.", renamed);
        }
        Ok(renamed)
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn ledger(&self) -> &Arc<RevertLedger> {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        thread,
        time::Duration,
    };

    use super::*;
    use crate::{
        ledger::testing::FlakyStore,
        settings::MemoryStore,
        tweaks::{method::testing::RecordingRunner, Action},
    };

    struct Fixture {
        runner: Arc<RecordingRunner>,
        ledger: Arc<RevertLedger>,
        dispatcher: ToggleDispatcher,
    }

    fn fixture(runner: RecordingRunner) -> Fixture {
        let catalog = Catalog::builtin();
        let runner = Arc::new(runner);
        let ledger = Arc::new(RevertLedger::new(Arc::new(MemoryStore::default())));
        let locks = Arc::new(KeyLocks::for_catalog(&catalog));
        let dispatcher = ToggleDispatcher::new(catalog, runner.clone(), ledger.clone(), locks);
        Fixture {
            runner,
            ledger,
            dispatcher,
        }
    }

    #[test]
    fn test_sysmain_off_then_on() {
        let f = fixture(RecordingRunner::default());

        f.dispatcher.set_toggle("SysMain", false).unwrap();
        assert_eq!(f.runner.calls(), vec!["DisableSysMain"]);
        assert_eq!(f.ledger.list_all().unwrap(), vec!["EnableSysMain"]);
        assert_eq!(f.dispatcher.current_state("SysMain").unwrap(), Some(false));

        f.dispatcher.set_toggle("SysMain", true).unwrap();
        assert_eq!(f.runner.calls(), vec!["DisableSysMain", "EnableSysMain"]);
        assert!(f.ledger.list_all().unwrap().is_empty());
        assert_eq!(f.dispatcher.current_state("SysMain").unwrap(), Some(true));
    }

    #[test]
    fn test_default_off_toggle_records_its_off_action() {
        let f = fixture(RecordingRunner::default());

        f.dispatcher.set_toggle("WindowsDarkMode", true).unwrap();
        assert_eq!(f.ledger.list_all().unwrap(), vec!["DisableWindowsDarkMode"]);
    }

    #[test]
    fn test_repeated_set_is_idempotent() {
        let f = fixture(RecordingRunner::default());

        f.dispatcher.set_toggle("Cortana", false).unwrap();
        let once = f.ledger.list_all().unwrap();
        f.dispatcher.set_toggle("Cortana", false).unwrap();
        assert_eq!(f.ledger.list_all().unwrap(), once);

        f.dispatcher.set_toggle("Cortana", true).unwrap();
        f.dispatcher.set_toggle("Cortana", true).unwrap();
        assert!(f.ledger.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_failed_action_leaves_ledger_untouched() {
        let f = fixture(RecordingRunner::failing_on(&["DisableSysMain"]));

        let err = f.dispatcher.set_toggle("SysMain", false).unwrap_err();
        match err {
            MutationError::MutationFailure { key, action, .. } => {
                assert_eq!(key, "SysMain");
                assert_eq!(action, "DisableSysMain");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(f.ledger.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_toggle() {
        let f = fixture(RecordingRunner::default());
        assert!(matches!(
            f.dispatcher.set_toggle("TurboButton", true),
            Err(MutationError::UnknownToggle(_))
        ));
        assert!(f.runner.calls().is_empty());
        assert_eq!(f.dispatcher.current_state("TurboButton").unwrap(), None);
    }

    #[test]
    fn test_alias_updates_the_same_ledger_entry() {
        let f = fixture(RecordingRunner::default());

        f.dispatcher.set_toggle("LocationAccess", false).unwrap();
        assert_eq!(f.ledger.list_all().unwrap(), vec!["EnableLocationFeatures"]);
        f.dispatcher.set_toggle("LocationFeatures", true).unwrap();
        assert!(f.ledger.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_legacy_ledger_entry_counts_as_pending() {
        let f = fixture(RecordingRunner::default());
        f.ledger.add("EnableSMB(\"1\")").unwrap();

        assert_eq!(f.dispatcher.current_state("SMBv1").unwrap(), Some(false));
        assert_eq!(f.dispatcher.current_state("SMBv2").unwrap(), Some(true));

        f.dispatcher.set_toggle("SMBv1", true).unwrap();
        assert!(f.ledger.list_all().unwrap().is_empty());
        assert_eq!(f.dispatcher.current_state("SMBv1").unwrap(), Some(true));
    }

    #[test]
    fn test_leaving_default_replaces_legacy_entry() {
        let f = fixture(RecordingRunner::default());
        f.ledger.add("EnableSMB(\"2\")").unwrap();

        f.dispatcher.set_toggle("SMBv2", false).unwrap();
        assert_eq!(f.ledger.list_all().unwrap(), vec!["EnableSMBv2"]);
    }

    #[test]
    fn test_migrate_legacy_entries() {
        let f = fixture(RecordingRunner::default());
        for name in ["EnableSMB(\"2\")", "EnableCortana", "EnableSMB(\"1\")"] {
            f.ledger.add(name).unwrap();
        }

        assert_eq!(f.dispatcher.migrate_legacy_entries().unwrap(), 2);
        assert_eq!(
            f.ledger.list_all().unwrap(),
            vec!["EnableSMBv2", "EnableCortana", "EnableSMBv1"]
        );
        assert_eq!(f.dispatcher.migrate_legacy_entries().unwrap(), 0);
    }

    #[test]
    fn test_ledger_write_failure_is_reported() {
        let catalog = Catalog::builtin();
        let runner = Arc::new(RecordingRunner::default());
        let ledger = Arc::new(
            RevertLedger::new(Arc::new(FlakyStore::failing(u32::MAX))).with_persist_attempts(2),
        );
        let locks = Arc::new(KeyLocks::for_catalog(&catalog));
        let dispatcher = ToggleDispatcher::new(catalog, runner.clone(), ledger, locks);

        let err = dispatcher.set_toggle("SysMain", false).unwrap_err();
        assert!(matches!(err, MutationError::LedgerPersistFailure { .. }));
        assert_eq!(runner.calls(), vec!["DisableSysMain"]);
    }

    /// Counts how many runs are in flight at once.
    #[derive(Default)]
    struct OverlapRunner {
        active: AtomicUsize,
        max_active: AtomicUsize,
    }

    impl ActionRunner for OverlapRunner {
        fn run(&self, _action: &Action) -> anyhow::Result<()> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_same_key_calls_are_serialised() {
        let catalog = Catalog::builtin();
        let runner = Arc::new(OverlapRunner::default());
        let ledger = Arc::new(RevertLedger::new(Arc::new(MemoryStore::default())));
        let locks = Arc::new(KeyLocks::for_catalog(&catalog));
        let dispatcher = Arc::new(ToggleDispatcher::new(catalog, runner.clone(), ledger, locks));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let dispatcher = Arc::clone(&dispatcher);
                thread::spawn(move || dispatcher.set_toggle("SysMain", i % 2 == 0).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(runner.max_active.load(Ordering::SeqCst), 1);
    }
}
