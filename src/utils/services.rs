// src/utils/services.rs

use anyhow::Context;
use widestring::U16CString;
use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{
            ERROR_SERVICE_ALREADY_RUNNING, ERROR_SERVICE_DOES_NOT_EXIST, ERROR_SERVICE_NOT_ACTIVE,
        },
        System::Services::{
            ChangeServiceConfigW, CloseServiceHandle, ControlService, OpenSCManagerW, OpenServiceW,
            StartServiceW, ENUM_SERVICE_TYPE, SC_HANDLE, SC_MANAGER_CONNECT, SERVICE_AUTO_START,
            SERVICE_CHANGE_CONFIG, SERVICE_CONTROL_STOP, SERVICE_DEMAND_START, SERVICE_DISABLED,
            SERVICE_ERROR, SERVICE_NO_CHANGE, SERVICE_QUERY_STATUS, SERVICE_START,
            SERVICE_STATUS, SERVICE_STOP,
        },
    },
};

use crate::tweaks::step::StartupType;

/// Closes a service or service-manager handle when dropped.
struct ServiceHandleGuard(SC_HANDLE);

impl Drop for ServiceHandleGuard {
    fn drop(&mut self) {
        if let Err(e) = unsafe { CloseServiceHandle(self.0) } {
            tracing::error!("CloseServiceHandle failed: {:?}", e);
        }
    }
}

/// Opens `service_name` with `access`. Returns `Ok(None)` if the service is not installed.
fn open_service(service_name: &str, access: u32) -> anyhow::Result<Option<ServiceHandleGuard>> {
    let manager = unsafe { OpenSCManagerW(PCWSTR::null(), PCWSTR::null(), SC_MANAGER_CONNECT) }
        .context("Failed to open Service Control Manager")?;
    let manager = ServiceHandleGuard(manager);

    let wide_name = U16CString::from_str(service_name)
        .with_context(|| format!("Invalid service name '{}'", service_name))?;

    match unsafe { OpenServiceW(manager.0, PCWSTR::from_raw(wide_name.as_ptr()), access) } {
        Ok(handle) => Ok(Some(ServiceHandleGuard(handle))),
        Err(e) if e.code() == ERROR_SERVICE_DOES_NOT_EXIST.to_hresult() => {
            tracing::debug!("Service '{}' is not installed, skipping.", service_name);
            Ok(None)
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to open service '{}': {:?}",
            service_name,
            e
        )),
    }
}

/// Changes the start type of a service. Missing services are skipped.
pub fn set_service_startup(service_name: &str, startup: StartupType) -> anyhow::Result<()> {
    let Some(service) = open_service(service_name, SERVICE_CHANGE_CONFIG)? else {
        return Ok(());
    };

    let start_type = match startup {
        StartupType::Automatic => SERVICE_AUTO_START,
        StartupType::Manual => SERVICE_DEMAND_START,
        StartupType::Disabled => SERVICE_DISABLED,
    };

    unsafe {
        ChangeServiceConfigW(
            service.0,
            ENUM_SERVICE_TYPE(SERVICE_NO_CHANGE),
            start_type,
            SERVICE_ERROR(SERVICE_NO_CHANGE),
            PCWSTR::null(),
            PCWSTR::null(),
            None,
            PCWSTR::null(),
            PCWSTR::null(),
            PCWSTR::null(),
            PCWSTR::null(),
        )
    }
    .with_context(|| {
        format!(
            "Failed to set start type of service '{}' to {}",
            service_name, startup
        )
    })
}

/// Starts a service. Already running or missing services are not an error.
pub fn start_service(service_name: &str) -> anyhow::Result<()> {
    let Some(service) = open_service(service_name, SERVICE_START | SERVICE_QUERY_STATUS)? else {
        return Ok(());
    };

    match unsafe { StartServiceW(service.0, None) } {
        Ok(_) => Ok(()),
        Err(e) if e.code() == ERROR_SERVICE_ALREADY_RUNNING.to_hresult() => Ok(()),
        Err(e) => Err(anyhow::anyhow!(
            "Failed to start service '{}': {:?}",
            service_name,
            e
        )),
    }
}

/// Sends a stop control to a service. Stopped or missing services are not an error.
pub fn stop_service(service_name: &str) -> anyhow::Result<()> {
    let Some(service) = open_service(service_name, SERVICE_STOP | SERVICE_QUERY_STATUS)? else {
        return Ok(());
    };

    let mut status = SERVICE_STATUS::default();
    match unsafe { ControlService(service.0, SERVICE_CONTROL_STOP, &mut status) } {
        Ok(_) => Ok(()),
        Err(e) if e.code() == ERROR_SERVICE_NOT_ACTIVE.to_hresult() => Ok(()),
        Err(e) => Err(anyhow::anyhow!(
            "Failed to stop service '{}': {:?}",
            service_name,
            e
        )),
    }
}
