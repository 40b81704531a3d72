// src/executor.rs

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    dispatcher::KeyLocks,
    errors::{LedgerError, RevertError},
    ledger::RevertLedger,
    tweaks::{catalog::Catalog, method::ActionRunner},
};

/// What happens to the revert ledger once a sweep has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SweepPolicy {
    /// Empty the ledger, failed entries included.
    Clear,
    /// Drop the entries that were reverted and keep the ones that failed. Entries
    /// no catalog action answers to can never succeed and are dropped too.
    #[default]
    RetainFailed,
    /// Leave the ledger exactly as it was.
    Retain,
}

/// Outcome of one revert sweep, in ledger order.
#[derive(Debug, Default)]
pub struct RevertReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, RevertError)>,
}

impl RevertReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn ensure_complete(&self) -> Result<(), RevertError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(RevertError::Partial {
                failed: self.failed.len(),
                total: self.total(),
            })
        }
    }
}

/// Runs every action recorded in the revert ledger.
pub struct RevertExecutor {
    catalog: Arc<Catalog>,
    runner: Arc<dyn ActionRunner>,
    ledger: Arc<RevertLedger>,
    locks: Arc<KeyLocks>,
}

impl RevertExecutor {
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

    /// Runs a snapshot of the ledger in order. A failing entry does not stop the
    /// sweep, and the ledger itself is not modified here; see [`Self::settle`].
    pub fn revert_all(&self) -> Result<RevertReport, LedgerError> {
        let pending = self.ledger.list_all()?;
        info!("Reverting {} pending change(s).", pending.len());

        let mut report = RevertReport::default();
        for name in pending {
            match self.revert_one(&name) {
                Ok(()) => report.succeeded.push(name),
                Err(e) => {
                    error!("{}", e);
                    report.failed.push((name, e));
                }
            }
        }

        if report.is_complete() {
            info!("Reverted {} change(s).", report.succeeded.len());
        } else {
            warn!(
                "Revert finished with {} failure(s) out of {}.",
                report.failed.len(),
                report.total()
            );
        }
        Ok(report)
    }

    fn revert_one(&self, name: &str) -> Result<(), RevertError> {
        let (entry, action) = self
            .catalog
            .action(name)
            .ok_or_else(|| RevertError::UnknownAction(name.to_string()))?;

        let _guard = self.locks.lock(entry.key);
        debug!("{} -> Running {}.", entry.key, action.name);
        self.runner
            .run(action)
            .map_err(|source| RevertError::MutationFailure {
                action: action.name.to_string(),
                source,
            })
    }

    /// Applies `policy` to the ledger after a sweep.
    pub fn settle(&self, report: &RevertReport, policy: SweepPolicy) -> Result<(), LedgerError> {
        match policy {
            SweepPolicy::Clear => self.ledger.clear(),
            SweepPolicy::RetainFailed => {
                let unknown = report.failed.iter().filter_map(|(name, e)| match e {
                    RevertError::UnknownAction(_) => {
                        warn!("{} -> Dropping unknown entry from the ledger.", name);
                        Some(name.as_str())
                    }
                    _ => None,
                });
                let removed = self.ledger.remove_all(
                    report.succeeded.iter().map(String::as_str).chain(unknown),
                )?;
                debug!("Removed {} settled entries from the ledger.", removed);
                Ok(())
            }
            SweepPolicy::Retain => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{settings::MemoryStore, tweaks::method::testing::RecordingRunner};

    struct Fixture {
        runner: Arc<RecordingRunner>,
        ledger: Arc<RevertLedger>,
        executor: RevertExecutor,
    }

    fn fixture(runner: RecordingRunner, pending: &[&str]) -> Fixture {
        let catalog = Catalog::builtin();
        let runner = Arc::new(runner);
        let ledger = Arc::new(RevertLedger::new(Arc::new(MemoryStore::default())));
        for name in pending {
            ledger.add(name).unwrap();
        }
        let locks = Arc::new(KeyLocks::for_catalog(&catalog));
        let executor = RevertExecutor::new(catalog, runner.clone(), ledger.clone(), locks);
        Fixture {
            runner,
            ledger,
            executor,
        }
    }

    #[test]
    fn test_failure_does_not_stop_the_sweep() {
        let f = fixture(
            RecordingRunner::failing_on(&["EnableCortana"]),
            &["EnableSysMain", "EnableCortana", "EnableSearch"],
        );

        let report = f.executor.revert_all().unwrap();
        assert_eq!(
            f.runner.calls(),
            vec!["EnableSysMain", "EnableCortana", "EnableSearch"]
        );
        assert_eq!(report.succeeded, vec!["EnableSysMain", "EnableSearch"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "EnableCortana");
        assert!(matches!(
            report.ensure_complete(),
            Err(RevertError::Partial {
                failed: 1,
                total: 3
            })
        ));

        // nothing is removed until settle
        assert_eq!(f.ledger.list_all().unwrap().len(), 3);
    }

    #[test]
    fn test_empty_ledger_runs_nothing() {
        let f = fixture(RecordingRunner::default(), &[]);
        let report = f.executor.revert_all().unwrap();
        assert!(f.runner.calls().is_empty());
        assert_eq!(report.total(), 0);
        assert!(report.ensure_complete().is_ok());
    }

    #[test]
    fn test_unknown_and_legacy_names() {
        let f = fixture(
            RecordingRunner::default(),
            &["EnableTurboButton", "EnableSMB(\"1\")"],
        );

        let report = f.executor.revert_all().unwrap();
        assert_eq!(f.runner.calls(), vec!["EnableSMBv1"]);
        assert_eq!(report.succeeded, vec!["EnableSMB(\"1\")"]);
        assert!(matches!(
            &report.failed[..],
            [(name, RevertError::UnknownAction(_))] if name == "EnableTurboButton"
        ));
    }

    #[test]
    fn test_settle_retain_failed() {
        let f = fixture(
            RecordingRunner::failing_on(&["EnableCortana"]),
            &["EnableSysMain", "EnableCortana", "EnableSearch"],
        );
        let report = f.executor.revert_all().unwrap();
        f.executor
            .settle(&report, SweepPolicy::RetainFailed)
            .unwrap();
        assert_eq!(f.ledger.list_all().unwrap(), vec!["EnableCortana"]);
    }

    #[test]
    fn test_settle_retain_failed_drops_unknown_entries() {
        let f = fixture(
            RecordingRunner::failing_on(&["EnableCortana"]),
            &["EnableTurboButton", "EnableCortana", "EnableSysMain"],
        );
        let report = f.executor.revert_all().unwrap();
        assert_eq!(report.failed.len(), 2);

        f.executor
            .settle(&report, SweepPolicy::RetainFailed)
            .unwrap();
        assert_eq!(f.ledger.list_all().unwrap(), vec!["EnableCortana"]);

        // The next sweep only retries what can still succeed.
        let report = f.executor.revert_all().unwrap();
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_settle_clear_and_retain() {
        let pending = ["EnableSysMain", "EnableCortana"];

        let f = fixture(RecordingRunner::failing_on(&["EnableCortana"]), &pending);
        let report = f.executor.revert_all().unwrap();
        f.executor.settle(&report, SweepPolicy::Retain).unwrap();
        assert_eq!(f.ledger.list_all().unwrap(), pending);
        f.executor.settle(&report, SweepPolicy::Clear).unwrap();
        assert!(f.ledger.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_sweep_policy_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: SweepPolicy,
        }
        let parsed: Wrapper = toml::from_str("policy = \"retain-failed\"").unwrap();
        assert_eq!(parsed.policy, SweepPolicy::RetainFailed);
        assert_eq!(SweepPolicy::default(), SweepPolicy::RetainFailed);
    }
}
