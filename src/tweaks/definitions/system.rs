// src/tweaks/definitions/system.rs

use crate::tweaks::{
    step::{delete_value, dword, run, startup, stop, string, StartupType::*},
    Action, ToggleEntry, TweakCategory,
};

const SESSION_MANAGER: &str = "HKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control\\Session Manager";
const MEMORY_MANAGEMENT: &str =
    "HKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control\\Session Manager\\Memory Management";
const CONTROL: &str = "HKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control";
const CRASH_CONTROL: &str = "HKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control\\CrashControl";
const USER_EXPLORER_POLICIES: &str =
    "HKEY_CURRENT_USER\\Software\\Microsoft\\Windows\\CurrentVersion\\Policies\\Explorer";
const SYSTEM_POLICIES: &str =
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Policies\\System";
const WINDOWS_UPDATE_AU: &str =
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\WindowsUpdate\\AU";
const WINDOWS_UPDATE: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\WindowsUpdate";
const DEVICE_GUARD: &str = "HKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control\\DeviceGuard";
const ERROR_REPORTING: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows\\Windows Error Reporting";

pub static ENTRIES: &[ToggleEntry] = &[
    ToggleEntry {
        key: "LegacyBootMenu",
        name: "Legacy boot menu",
        category: TweakCategory::System,
        on: Action {
            name: "EnableLegacyBootMenu",
            steps: &[run("bcdedit", &["/set", "{current}", "bootmenupolicy", "Legacy"])],
        },
        off: Action {
            name: "DisableLegacyBootMenu",
            steps: &[run("bcdedit", &["/set", "{current}", "bootmenupolicy", "Standard"])],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "OptimizeNTFS",
        name: "Optimize NTFS",
        category: TweakCategory::System,
        on: Action {
            name: "EnableOptimizeNTFS",
            steps: &[
                run("fsutil", &["behavior", "set", "disable8dot3", "1"]),
                run("fsutil", &["behavior", "set", "memoryusage", "2"]),
            ],
        },
        off: Action {
            name: "DisableOptimizeNTFS",
            steps: &[
                run("fsutil", &["behavior", "set", "disable8dot3", "2"]),
                run("fsutil", &["behavior", "set", "memoryusage", "1"]),
            ],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "NTFSTimeStamp",
        name: "NTFS last access timestamps",
        category: TweakCategory::System,
        on: Action {
            name: "EnableNTFSTimeStamp",
            steps: &[run("fsutil", &["behavior", "set", "disablelastaccess", "2"])],
        },
        off: Action {
            name: "DisableNTFSTimeStamp",
            steps: &[run("fsutil", &["behavior", "set", "disablelastaccess", "1"])],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "PagingSettings",
        name: "Page kernel and drivers to disk",
        category: TweakCategory::System,
        on: Action {
            name: "EnablePagingSettings",
            steps: &[dword(MEMORY_MANAGEMENT, "DisablePagingExecutive", 0)],
        },
        off: Action {
            name: "DisablePagingSettings",
            steps: &[dword(MEMORY_MANAGEMENT, "DisablePagingExecutive", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "WPBT",
        name: "Windows Platform Binary Table",
        category: TweakCategory::System,
        on: Action {
            name: "EnableWPBT",
            steps: &[delete_value(SESSION_MANAGER, "DisableWpbtExecution")],
        },
        off: Action {
            name: "DisableWPBT",
            steps: &[dword(SESSION_MANAGER, "DisableWpbtExecution", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "ServiceHostSplitting",
        name: "Service host splitting",
        category: TweakCategory::System,
        on: Action {
            name: "EnableServiceHostSplitting",
            steps: &[dword(CONTROL, "SvcHostSplitThresholdInKB", 0x0038_0000)],
        },
        off: Action {
            name: "DisableServiceHostSplitting",
            steps: &[dword(CONTROL, "SvcHostSplitThresholdInKB", 0xFFFF_FFFF)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "CrashDump",
        name: "Crash dumps",
        category: TweakCategory::System,
        on: Action {
            name: "EnableCrashDump",
            steps: &[
                dword(CRASH_CONTROL, "CrashDumpEnabled", 7),
                dword(CRASH_CONTROL, "LogEvent", 1),
            ],
        },
        off: Action {
            name: "DisableCrashDump",
            steps: &[
                dword(CRASH_CONTROL, "CrashDumpEnabled", 0),
                dword(CRASH_CONTROL, "LogEvent", 0),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "RemoteAssistance",
        name: "Remote Assistance",
        category: TweakCategory::System,
        on: Action {
            name: "EnableRemoteAssistance",
            steps: &[dword(
                "HKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control\\Remote Assistance",
                "fAllowToGetHelp",
                1,
            )],
        },
        off: Action {
            name: "DisableRemoteAssistance",
            steps: &[dword(
                "HKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control\\Remote Assistance",
                "fAllowToGetHelp",
                0,
            )],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "TaskTimeouts",
        name: "Short hung-task timeouts",
        category: TweakCategory::System,
        on: Action {
            name: "AdjustTaskTimeouts",
            steps: &[
                string("HKEY_CURRENT_USER\\Control Panel\\Desktop", "AutoEndTasks", "1"),
                string("HKEY_CURRENT_USER\\Control Panel\\Desktop", "HungAppTimeout", "1000"),
                string("HKEY_CURRENT_USER\\Control Panel\\Desktop", "WaitToKillAppTimeout", "2000"),
                string("HKEY_CURRENT_USER\\Control Panel\\Desktop", "LowLevelHooksTimeout", "1000"),
            ],
        },
        off: Action {
            name: "IncreaseTaskTimeouts",
            steps: &[
                delete_value("HKEY_CURRENT_USER\\Control Panel\\Desktop", "AutoEndTasks"),
                string("HKEY_CURRENT_USER\\Control Panel\\Desktop", "HungAppTimeout", "5000"),
                string("HKEY_CURRENT_USER\\Control Panel\\Desktop", "WaitToKillAppTimeout", "20000"),
                delete_value("HKEY_CURRENT_USER\\Control Panel\\Desktop", "LowLevelHooksTimeout"),
            ],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "ServiceTimeouts",
        name: "Short service shutdown timeout",
        category: TweakCategory::System,
        on: Action {
            name: "DecreaseServiceTimeouts",
            steps: &[string(CONTROL, "WaitToKillServiceTimeout", "2000")],
        },
        off: Action {
            name: "RevertServiceTimeouts",
            steps: &[string(CONTROL, "WaitToKillServiceTimeout", "5000")],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "LowDiskSpaceChecks",
        name: "Low disk space warnings",
        category: TweakCategory::System,
        on: Action {
            name: "EnableLowDiskSpaceChecks",
            steps: &[delete_value(USER_EXPLORER_POLICIES, "NoLowDiskSpaceChecks")],
        },
        off: Action {
            name: "DisableLowDiskSpaceChecks",
            steps: &[dword(USER_EXPLORER_POLICIES, "NoLowDiskSpaceChecks", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "LinkResolve",
        name: "Shortcut target tracking",
        category: TweakCategory::System,
        on: Action {
            name: "EnableLinkResolve",
            steps: &[
                delete_value(USER_EXPLORER_POLICIES, "NoResolveTrack"),
                delete_value(USER_EXPLORER_POLICIES, "LinkResolveIgnoreLinkInfo"),
                delete_value(USER_EXPLORER_POLICIES, "NoResolveSearch"),
            ],
        },
        off: Action {
            name: "DisableLinkResolve",
            steps: &[
                dword(USER_EXPLORER_POLICIES, "NoResolveTrack", 1),
                dword(USER_EXPLORER_POLICIES, "LinkResolveIgnoreLinkInfo", 1),
                dword(USER_EXPLORER_POLICIES, "NoResolveSearch", 1),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "SystemRestore",
        name: "System Restore",
        category: TweakCategory::System,
        on: Action {
            name: "EnableSystemRestore",
            steps: &[
                delete_value(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows NT\\SystemRestore",
                    "DisableSR",
                ),
                run(
                    "powershell",
                    &["-NoProfile", "-Command", "Enable-ComputerRestore -Drive \"$env:SystemDrive\\\""],
                ),
            ],
        },
        off: Action {
            name: "DisableSystemRestore",
            steps: &[
                run(
                    "powershell",
                    &["-NoProfile", "-Command", "Disable-ComputerRestore -Drive \"$env:SystemDrive\\\""],
                ),
                dword(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows NT\\SystemRestore",
                    "DisableSR",
                    1,
                ),
            ],
        },
        default_state: true,
        confirmation: Some(
            "Disabling System Restore removes the ability to roll Windows back to an earlier \
             restore point. Continue?",
        ),
    },
    ToggleEntry {
        key: "VerboseLogon",
        name: "Verbose logon messages",
        category: TweakCategory::System,
        on: Action {
            name: "EnableVerboseLogon",
            steps: &[dword(SYSTEM_POLICIES, "VerboseStatus", 1)],
        },
        off: Action {
            name: "DisableVerboseLogon",
            steps: &[delete_value(SYSTEM_POLICIES, "VerboseStatus")],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "SMBv1",
        name: "SMB 1.0 server",
        category: TweakCategory::System,
        on: Action {
            name: "EnableSMBv1",
            steps: &[run(
                "powershell",
                &["-NoProfile", "-Command", "Set-SmbServerConfiguration -EnableSMB1Protocol $true -Force"],
            )],
        },
        off: Action {
            name: "DisableSMBv1",
            steps: &[run(
                "powershell",
                &["-NoProfile", "-Command", "Set-SmbServerConfiguration -EnableSMB1Protocol $false -Force"],
            )],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "SMBv2",
        name: "SMB 2.0 server",
        category: TweakCategory::System,
        on: Action {
            name: "EnableSMBv2",
            steps: &[run(
                "powershell",
                &["-NoProfile", "-Command", "Set-SmbServerConfiguration -EnableSMB2Protocol $true -Force"],
            )],
        },
        off: Action {
            name: "DisableSMBv2",
            steps: &[run(
                "powershell",
                &["-NoProfile", "-Command", "Set-SmbServerConfiguration -EnableSMB2Protocol $false -Force"],
            )],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "ErrorReporting",
        name: "Windows Error Reporting",
        category: TweakCategory::System,
        on: Action {
            name: "EnableErrorReporting",
            steps: &[
                delete_value(ERROR_REPORTING, "Disabled"),
                startup("WerSvc", Manual),
            ],
        },
        off: Action {
            name: "DisableErrorReporting",
            steps: &[
                dword(ERROR_REPORTING, "Disabled", 1),
                stop("WerSvc"),
                startup("WerSvc", Disabled),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "AutomaticUpdates",
        name: "Automatic Windows updates",
        category: TweakCategory::System,
        on: Action {
            name: "EnableAutomaticUpdates",
            steps: &[
                delete_value(WINDOWS_UPDATE_AU, "NoAutoUpdate"),
                delete_value(WINDOWS_UPDATE_AU, "AUOptions"),
            ],
        },
        off: Action {
            name: "DisableAutomaticUpdates",
            steps: &[
                dword(WINDOWS_UPDATE_AU, "NoAutoUpdate", 1),
                dword(WINDOWS_UPDATE_AU, "AUOptions", 2),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "StoreUpdates",
        name: "Automatic Store app updates",
        category: TweakCategory::System,
        on: Action {
            name: "EnableStoreUpdates",
            steps: &[delete_value(
                "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\WindowsStore",
                "AutoDownload",
            )],
        },
        off: Action {
            name: "DisableStoreUpdates",
            steps: &[dword(
                "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\WindowsStore",
                "AutoDownload",
                2,
            )],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "Drivers",
        name: "Drivers in Windows Update",
        category: TweakCategory::System,
        on: Action {
            name: "IncludeDrivers",
            steps: &[delete_value(WINDOWS_UPDATE, "ExcludeWUDriversInQualityUpdate")],
        },
        off: Action {
            name: "ExcludeDrivers",
            steps: &[dword(WINDOWS_UPDATE, "ExcludeWUDriversInQualityUpdate", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "VBS",
        name: "Virtualization-based security",
        category: TweakCategory::System,
        on: Action {
            name: "EnableVBS",
            steps: &[delete_value(DEVICE_GUARD, "EnableVirtualizationBasedSecurity")],
        },
        off: Action {
            name: "DisableVBS",
            steps: &[dword(DEVICE_GUARD, "EnableVirtualizationBasedSecurity", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "Hibernation",
        name: "Hibernation",
        category: TweakCategory::System,
        on: Action {
            name: "EnableHibernation",
            steps: &[run("powercfg", &["/hibernate", "on"])],
        },
        off: Action {
            name: "DisableHibernation",
            steps: &[run("powercfg", &["/hibernate", "off"])],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "AutomaticRestartSignOn",
        name: "Sign in automatically after updates",
        category: TweakCategory::System,
        on: Action {
            name: "EnableAutomaticRestartSignOn",
            steps: &[delete_value(SYSTEM_POLICIES, "DisableAutomaticRestartSignOn")],
        },
        off: Action {
            name: "DisableAutomaticRestartSignOn",
            steps: &[dword(SYSTEM_POLICIES, "DisableAutomaticRestartSignOn", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "SmartScreen",
        name: "SmartScreen",
        category: TweakCategory::System,
        on: Action {
            name: "EnableSmartScreen",
            steps: &[
                delete_value(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\System",
                    "EnableSmartScreen",
                ),
                string(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Explorer",
                    "SmartScreenEnabled",
                    "Warn",
                ),
            ],
        },
        off: Action {
            name: "DisableSmartScreen",
            steps: &[
                dword(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\System",
                    "EnableSmartScreen",
                    0,
                ),
                string(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Explorer",
                    "SmartScreenEnabled",
                    "Off",
                ),
            ],
        },
        default_state: true,
        confirmation: None,
    },
];
