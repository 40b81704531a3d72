// src/tweaks/method.rs

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, warn};

use super::{step::Step, Action};
use crate::{backend::SystemBackend, utils::registry::RegistryKeyValue};

/// Invokes a catalog action. The dispatcher and the revert executor only see this trait.
pub trait ActionRunner: Send + Sync {
    fn run(&self, action: &Action) -> Result<()>;
}

/// Runs an action's steps in order against a `SystemBackend`.
///
/// Registry writes inside one action are transactional: the previous values are
/// captured before each write and restored in reverse order if a later step fails.
/// Service and command steps are not rolled back, and neither is a value whose
/// previous contents could not be read.
pub struct StepRunner {
    backend: Arc<dyn SystemBackend>,
}

impl StepRunner {
    pub fn new(backend: Arc<dyn SystemBackend>) -> Self {
        Self { backend }
    }

    fn execute(&self, step: &Step) -> Result<()> {
        match step {
            Step::Registry { path, name, value } => self
                .backend
                .set_registry_value(path, name, value)
                .with_context(|| format!("Failed to set '{}' in '{}'", name, path)),
            Step::DeleteKey { path } => self.backend.delete_registry_key(path),
            Step::ServiceStartup { service, startup } => {
                self.backend.set_service_startup(service, *startup)
            }
            Step::StartService { service } => self.backend.start_service(service),
            Step::StopService { service } => self.backend.stop_service(service),
            Step::Run { program, args } => self.backend.run_command(program, args),
        }
    }

    fn rollback(
        &self,
        action: &Action,
        applied: &[(&'static str, &'static str, Option<RegistryKeyValue>)],
    ) -> Result<()> {
        debug!("{} -> Rolling back {} registry write(s).", action.name, applied.len());
        for (path, name, original) in applied.iter().rev() {
            let value = original.clone().unwrap_or(RegistryKeyValue::Deleted);
            self.backend
                .set_registry_value(path, name, &value)
                .with_context(|| format!("Failed to restore '{}' in '{}'", name, path))?;
            debug!("{} -> Restored '{}' to {} in '{}'.", action.name, name, value, path);
        }
        Ok(())
    }
}

impl ActionRunner for StepRunner {
    fn run(&self, action: &Action) -> Result<()> {
        debug!("{} -> Running {} step(s).", action.name, action.steps.len());
        let mut applied = Vec::new();

        let result = (|| -> Result<()> {
            for step in action.steps {
                if let Step::Registry { path, name, .. } = step {
                    match self.backend.read_registry_value(path, name) {
                        Ok(original) => {
                            self.execute(step)?;
                            applied.push((*path, *name, original));
                        }
                        Err(e) => {
                            warn!(
                                "{} -> Cannot snapshot '{}' in '{}', it will not be rolled back: {:#}",
                                action.name, name, path, e
                            );
                            self.execute(step)?;
                        }
                    }
                } else {
                    self.execute(step)?;
                }
                debug!("{} -> {}", action.name, step);
            }
            Ok(())
        })();

        if let Err(e) = result {
            error!("{} -> Step failed: {:#}. Attempting rollback.", action.name, e);
            if let Err(rollback_err) = self.rollback(action, &applied) {
                error!(
                    "{} -> Failed to roll back after error: {:#}",
                    action.name, rollback_err
                );
                anyhow::bail!("{:#}. Rollback failed: {:#}", e, rollback_err);
            }
            return Err(e);
        }

        debug!("{} -> Done.", action.name);
        Ok(())
    }
}

/// Runner fakes shared by the dispatcher and executor tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::{collections::HashSet, sync::Mutex};

    use super::*;

    /// Records every invoked action name and fails the ones listed in `failing`.
    #[derive(Default)]
    pub struct RecordingRunner {
        pub calls: Mutex<Vec<String>>,
        pub failing: Mutex<HashSet<String>>,
    }

    impl RecordingRunner {
        pub fn failing_on(names: &[&str]) -> Self {
            let runner = Self::default();
            runner
                .failing
                .lock()
                .unwrap()
                .extend(names.iter().map(|n| n.to_string()));
            runner
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ActionRunner for RecordingRunner {
        fn run(&self, action: &Action) -> Result<()> {
            self.calls.lock().unwrap().push(action.name.to_string());
            if self.failing.lock().unwrap().contains(action.name) {
                anyhow::bail!("{} failed on purpose", action.name);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use super::*;
    use crate::tweaks::step::{dword, start, stop, StartupType};

    const PATH: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\TuneXTest";

    /// In-memory registry that can be told to fail on a service name.
    #[derive(Default)]
    struct FakeBackend {
        registry: Mutex<HashMap<(String, String), RegistryKeyValue>>,
        log: Mutex<Vec<String>>,
        failing_service: Option<&'static str>,
        unreadable: Option<&'static str>,
    }

    impl FakeBackend {
        fn value(&self, name: &str) -> Option<RegistryKeyValue> {
            self.registry
                .lock()
                .unwrap()
                .get(&(PATH.to_string(), name.to_string()))
                .cloned()
        }
    }

    impl SystemBackend for FakeBackend {
        fn read_registry_value(&self, path: &str, name: &str) -> Result<Option<RegistryKeyValue>> {
            if self.unreadable == Some(name) {
                anyhow::bail!("Unsupported registry value type: REG_RESOURCE_LIST");
            }
            Ok(self
                .registry
                .lock()
                .unwrap()
                .get(&(path.to_string(), name.to_string()))
                .cloned())
        }

        fn set_registry_value(&self, path: &str, name: &str, value: &RegistryKeyValue) -> Result<()> {
            let mut registry = self.registry.lock().unwrap();
            let key = (path.to_string(), name.to_string());
            if *value == RegistryKeyValue::Deleted {
                registry.remove(&key);
            } else {
                registry.insert(key, value.clone());
            }
            self.log.lock().unwrap().push(format!("set {}", name));
            Ok(())
        }

        fn delete_registry_key(&self, path: &str) -> Result<()> {
            self.log.lock().unwrap().push(format!("delete {}", path));
            Ok(())
        }

        fn set_service_startup(&self, service: &str, startup: StartupType) -> Result<()> {
            self.log
                .lock()
                .unwrap()
                .push(format!("startup {} {}", service, startup));
            Ok(())
        }

        fn start_service(&self, service: &str) -> Result<()> {
            if self.failing_service == Some(service) {
                anyhow::bail!("service {} refused to start", service);
            }
            self.log.lock().unwrap().push(format!("start {}", service));
            Ok(())
        }

        fn stop_service(&self, service: &str) -> Result<()> {
            self.log.lock().unwrap().push(format!("stop {}", service));
            Ok(())
        }

        fn run_command(&self, program: &str, _args: &[&str]) -> Result<()> {
            self.log.lock().unwrap().push(format!("run {}", program));
            Ok(())
        }
    }

    static WRITE_THEN_START: Action = Action {
        name: "EnableTest",
        steps: &[
            dword(PATH, "First", 1),
            dword(PATH, "Second", 2),
            start("BrokenService"),
        ],
    };

    static STOP_AND_WRITE: Action = Action {
        name: "DisableTest",
        steps: &[stop("TestService"), dword(PATH, "First", 0)],
    };

    #[test]
    fn test_steps_run_in_order() {
        let backend = Arc::new(FakeBackend::default());
        let runner = StepRunner::new(backend.clone());

        runner.run(&STOP_AND_WRITE).unwrap();

        assert_eq!(
            *backend.log.lock().unwrap(),
            vec!["stop TestService".to_string(), "set First".to_string()]
        );
        assert_eq!(backend.value("First"), Some(RegistryKeyValue::Dword(0)));
    }

    #[test]
    fn test_failure_rolls_back_registry_writes() {
        let backend = Arc::new(FakeBackend {
            failing_service: Some("BrokenService"),
            ..Default::default()
        });
        backend.registry.lock().unwrap().insert(
            (PATH.to_string(), "First".to_string()),
            RegistryKeyValue::Dword(7),
        );
        let runner = StepRunner::new(backend.clone());

        let err = runner.run(&WRITE_THEN_START).unwrap_err();
        assert!(err.to_string().contains("BrokenService"));

        // First had a value before and gets it back; Second did not exist and is removed.
        assert_eq!(backend.value("First"), Some(RegistryKeyValue::Dword(7)));
        assert_eq!(backend.value("Second"), None);
    }

    #[test]
    fn test_unreadable_value_is_written_without_snapshot() {
        let backend = Arc::new(FakeBackend {
            failing_service: Some("BrokenService"),
            unreadable: Some("First"),
            ..Default::default()
        });
        let runner = StepRunner::new(backend.clone());

        runner.run(&STOP_AND_WRITE).unwrap();
        assert_eq!(backend.value("First"), Some(RegistryKeyValue::Dword(0)));

        // Only Second was captured, so only Second is restored.
        let err = runner.run(&WRITE_THEN_START).unwrap_err();
        assert!(err.to_string().contains("BrokenService"));
        assert_eq!(backend.value("First"), Some(RegistryKeyValue::Dword(1)));
        assert_eq!(backend.value("Second"), None);
    }
}
