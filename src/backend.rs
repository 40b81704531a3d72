// src/backend.rs

use std::{sync::Arc, time::Duration};

use crate::{
    tweaks::step::StartupType,
    utils::registry::{split_registry_path, RegistryKeyValue},
};

/// The narrow interface through which catalog steps touch the operating system.
pub trait SystemBackend: Send + Sync {
    /// Reads a registry value. `Ok(None)` when the value or its key does not exist.
    fn read_registry_value(&self, path: &str, name: &str)
        -> anyhow::Result<Option<RegistryKeyValue>>;

    /// Writes a registry value. `RegistryKeyValue::Deleted` removes it.
    fn set_registry_value(&self, path: &str, name: &str, value: &RegistryKeyValue)
        -> anyhow::Result<()>;

    fn delete_registry_key(&self, path: &str) -> anyhow::Result<()>;

    fn set_service_startup(&self, service: &str, startup: StartupType) -> anyhow::Result<()>;

    fn start_service(&self, service: &str) -> anyhow::Result<()>;

    fn stop_service(&self, service: &str) -> anyhow::Result<()>;

    fn run_command(&self, program: &str, args: &[&str]) -> anyhow::Result<()>;
}

/// Picks the backend for this host: the real one on Windows unless `dry_run` is set.
pub fn select_backend(dry_run: bool, command_timeout: Duration) -> Arc<dyn SystemBackend> {
    #[cfg(windows)]
    if !dry_run {
        return Arc::new(WindowsBackend::new(command_timeout));
    }

    #[cfg(not(windows))]
    let _ = command_timeout;

    if !dry_run {
        tracing::warn!("Not running on Windows, system changes will only be logged.");
    }
    Arc::new(DryRunBackend)
}

/// Applies steps to the live system through winreg, the service control manager
/// and child processes.
#[cfg(windows)]
pub struct WindowsBackend {
    command_timeout: Duration,
}

#[cfg(windows)]
impl WindowsBackend {
    pub fn new(command_timeout: Duration) -> Self {
        Self { command_timeout }
    }
}

#[cfg(windows)]
impl SystemBackend for WindowsBackend {
    fn read_registry_value(
        &self,
        path: &str,
        name: &str,
    ) -> anyhow::Result<Option<RegistryKeyValue>> {
        crate::utils::registry::read_registry_value(path, name)
    }

    fn set_registry_value(
        &self,
        path: &str,
        name: &str,
        value: &RegistryKeyValue,
    ) -> anyhow::Result<()> {
        crate::utils::registry::create_or_modify_registry_value(path, name, value)
    }

    fn delete_registry_key(&self, path: &str) -> anyhow::Result<()> {
        crate::utils::registry::delete_registry_key(path)
    }

    fn set_service_startup(&self, service: &str, startup: StartupType) -> anyhow::Result<()> {
        crate::utils::services::set_service_startup(service, startup)
    }

    fn start_service(&self, service: &str) -> anyhow::Result<()> {
        crate::utils::services::start_service(service)
    }

    fn stop_service(&self, service: &str) -> anyhow::Result<()> {
        crate::utils::services::stop_service(service)
    }

    fn run_command(&self, program: &str, args: &[&str]) -> anyhow::Result<()> {
        crate::utils::command::run_command(program, args, self.command_timeout)
    }
}

/// Logs every step instead of performing it. Reads report nothing stored.
#[derive(Debug, Default)]
pub struct DryRunBackend;

impl SystemBackend for DryRunBackend {
    fn read_registry_value(
        &self,
        path: &str,
        _name: &str,
    ) -> anyhow::Result<Option<RegistryKeyValue>> {
        split_registry_path(path)?;
        Ok(None)
    }

    fn set_registry_value(
        &self,
        path: &str,
        name: &str,
        value: &RegistryKeyValue,
    ) -> anyhow::Result<()> {
        split_registry_path(path)?;
        tracing::info!("[dry run] {}\\{} = {}", path, name, value);
        Ok(())
    }

    fn delete_registry_key(&self, path: &str) -> anyhow::Result<()> {
        split_registry_path(path)?;
        tracing::info!("[dry run] delete key {}", path);
        Ok(())
    }

    fn set_service_startup(&self, service: &str, startup: StartupType) -> anyhow::Result<()> {
        tracing::info!("[dry run] service {} startup = {}", service, startup);
        Ok(())
    }

    fn start_service(&self, service: &str) -> anyhow::Result<()> {
        tracing::info!("[dry run] start service {}", service);
        Ok(())
    }

    fn stop_service(&self, service: &str) -> anyhow::Result<()> {
        tracing::info!("[dry run] stop service {}", service);
        Ok(())
    }

    fn run_command(&self, program: &str, args: &[&str]) -> anyhow::Result<()> {
        tracing::info!("[dry run] run {} {}", program, args.join(" "));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_rejects_malformed_paths() {
        let backend = DryRunBackend;
        assert!(backend
            .set_registry_value("HKLM\\Software", "X", &RegistryKeyValue::Dword(1))
            .is_err());
        assert!(backend.delete_registry_key("HKEY_CURRENT_USER").is_err());
    }

    #[test]
    fn test_dry_run_reports_nothing_stored() {
        let backend = DryRunBackend;
        let value = backend
            .read_registry_value("HKEY_CURRENT_USER\\Software\\TuneX", "RevertList")
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_select_backend_dry_run() {
        let backend = select_backend(true, Duration::from_secs(1));
        assert!(backend.run_command("shutdown", &["/r"]).is_ok());
    }
}
