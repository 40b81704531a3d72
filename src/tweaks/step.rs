// src/tweaks/step.rs

use std::{borrow::Cow, fmt};

use crate::utils::registry::RegistryKeyValue;

/// Start type written to a service's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupType {
    Automatic,
    Manual,
    Disabled,
}

impl fmt::Display for StartupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupType::Automatic => write!(f, "Automatic"),
            StartupType::Manual => write!(f, "Manual"),
            StartupType::Disabled => write!(f, "Disabled"),
        }
    }
}

/// A single change to system state. An action is an ordered list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Writes `value` to `name` under `path`, creating intermediate keys.
    /// `RegistryKeyValue::Deleted` removes the value instead.
    Registry {
        path: &'static str,
        name: &'static str,
        value: RegistryKeyValue,
    },
    /// Removes a registry key and all of its subkeys.
    DeleteKey { path: &'static str },
    ServiceStartup {
        service: &'static str,
        startup: StartupType,
    },
    StartService { service: &'static str },
    StopService { service: &'static str },
    /// Runs an external program and waits (bounded) for it to exit.
    Run {
        program: &'static str,
        args: &'static [&'static str],
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Registry { path, name, value } => write!(f, "{}\\{} = {}", path, name, value),
            Step::DeleteKey { path } => write!(f, "delete key {}", path),
            Step::ServiceStartup { service, startup } => {
                write!(f, "service {} startup = {}", service, startup)
            }
            Step::StartService { service } => write!(f, "start service {}", service),
            Step::StopService { service } => write!(f, "stop service {}", service),
            Step::Run { program, args } => write!(f, "run {} {}", program, args.join(" ")),
        }
    }
}

pub const HKLM: &str = "HKEY_LOCAL_MACHINE";
pub const HKCU: &str = "HKEY_CURRENT_USER";

pub const fn dword(path: &'static str, name: &'static str, value: u32) -> Step {
    Step::Registry {
        path,
        name,
        value: RegistryKeyValue::Dword(value),
    }
}

pub const fn string(path: &'static str, name: &'static str, value: &'static str) -> Step {
    Step::Registry {
        path,
        name,
        value: RegistryKeyValue::String(Cow::Borrowed(value)),
    }
}

pub const fn delete_value(path: &'static str, name: &'static str) -> Step {
    Step::Registry {
        path,
        name,
        value: RegistryKeyValue::Deleted,
    }
}

pub const fn delete_key(path: &'static str) -> Step {
    Step::DeleteKey { path }
}

pub const fn startup(service: &'static str, startup: StartupType) -> Step {
    Step::ServiceStartup { service, startup }
}

pub const fn start(service: &'static str) -> Step {
    Step::StartService { service }
}

pub const fn stop(service: &'static str) -> Step {
    Step::StopService { service }
}

pub const fn run(program: &'static str, args: &'static [&'static str]) -> Step {
    Step::Run { program, args }
}
