// src/tweaks/definitions/services.rs

use crate::tweaks::{
    step::{delete_value, dword, start, startup, stop, StartupType::*},
    Action, ToggleEntry, TweakCategory,
};

const DATA_COLLECTION: &str =
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\DataCollection";

pub static ENTRIES: &[ToggleEntry] = &[
    ToggleEntry {
        key: "TelemetryServices",
        name: "Telemetry services",
        category: TweakCategory::Services,
        on: Action {
            name: "EnableTelemetryServices",
            steps: &[
                delete_value(DATA_COLLECTION, "AllowTelemetry"),
                startup("DiagTrack", Automatic),
                start("DiagTrack"),
                startup("dmwappushservice", Manual),
            ],
        },
        off: Action {
            name: "DisableTelemetryServices",
            steps: &[
                dword(DATA_COLLECTION, "AllowTelemetry", 0),
                stop("DiagTrack"),
                startup("DiagTrack", Disabled),
                stop("dmwappushservice"),
                startup("dmwappushservice", Disabled),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "RemoteRegistry",
        name: "Remote Registry",
        category: TweakCategory::Services,
        on: Action {
            name: "EnableRemoteRegistry",
            steps: &[startup("RemoteRegistry", Manual)],
        },
        off: Action {
            name: "DisableRemoteRegistry",
            steps: &[stop("RemoteRegistry"), startup("RemoteRegistry", Disabled)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "HomeGroup",
        name: "HomeGroup",
        category: TweakCategory::Services,
        on: Action {
            name: "EnableHomeGroup",
            steps: &[
                startup("HomeGroupListener", Manual),
                startup("HomeGroupProvider", Manual),
            ],
        },
        off: Action {
            name: "DisableHomeGroup",
            steps: &[
                stop("HomeGroupListener"),
                startup("HomeGroupListener", Disabled),
                stop("HomeGroupProvider"),
                startup("HomeGroupProvider", Disabled),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "PrintService",
        name: "Print Spooler",
        category: TweakCategory::Services,
        on: Action {
            name: "EnablePrintService",
            steps: &[startup("Spooler", Automatic), start("Spooler")],
        },
        off: Action {
            name: "DisablePrintService",
            steps: &[stop("Spooler"), startup("Spooler", Disabled)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "SysMain",
        name: "SysMain (Superfetch)",
        category: TweakCategory::Services,
        on: Action {
            name: "EnableSysMain",
            steps: &[startup("SysMain", Automatic), start("SysMain")],
        },
        off: Action {
            name: "DisableSysMain",
            steps: &[stop("SysMain"), startup("SysMain", Disabled)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "CompatibilityAssistant",
        name: "Program Compatibility Assistant",
        category: TweakCategory::Services,
        on: Action {
            name: "EnableCompatibilityAssistant",
            steps: &[startup("PcaSvc", Automatic), start("PcaSvc")],
        },
        off: Action {
            name: "DisableCompatibilityAssistant",
            steps: &[stop("PcaSvc"), startup("PcaSvc", Disabled)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "Search",
        name: "Windows Search indexing",
        category: TweakCategory::Services,
        on: Action {
            name: "EnableSearch",
            steps: &[startup("WSearch", Automatic), start("WSearch")],
        },
        off: Action {
            name: "DisableSearch",
            steps: &[stop("WSearch"), startup("WSearch", Disabled)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "Biometrics",
        name: "Windows Biometric Service",
        category: TweakCategory::Services,
        on: Action {
            name: "EnableBiometrics",
            steps: &[
                delete_value(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Biometrics",
                    "Enabled",
                ),
                startup("WbioSrvc", Manual),
            ],
        },
        off: Action {
            name: "DisableBiometrics",
            steps: &[
                dword(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Biometrics",
                    "Enabled",
                    0,
                ),
                stop("WbioSrvc"),
                startup("WbioSrvc", Disabled),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "SensorServices",
        name: "Sensor services",
        category: TweakCategory::Services,
        on: Action {
            name: "EnableSensorServices",
            steps: &[
                startup("SensorService", Manual),
                startup("SensrSvc", Manual),
                startup("SensorDataService", Manual),
            ],
        },
        off: Action {
            name: "DisableSensorServices",
            steps: &[
                stop("SensorService"),
                startup("SensorService", Disabled),
                stop("SensrSvc"),
                startup("SensrSvc", Disabled),
                stop("SensorDataService"),
                startup("SensorDataService", Disabled),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "FaxService",
        name: "Fax",
        category: TweakCategory::Services,
        on: Action {
            name: "EnableFaxService",
            steps: &[startup("Fax", Manual)],
        },
        off: Action {
            name: "DisableFaxService",
            steps: &[stop("Fax"), startup("Fax", Disabled)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "InsiderService",
        name: "Windows Insider Service",
        category: TweakCategory::Services,
        on: Action {
            name: "EnableInsiderService",
            steps: &[startup("wisvc", Manual)],
        },
        off: Action {
            name: "DisableInsiderService",
            steps: &[stop("wisvc"), startup("wisvc", Disabled)],
        },
        default_state: true,
        confirmation: None,
    },
];
