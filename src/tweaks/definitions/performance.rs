// src/tweaks/definitions/performance.rs

use crate::tweaks::{
    step::{delete_value, dword, string},
    Action, ToggleEntry, TweakCategory,
};

const PRIORITY_CONTROL: &str = "HKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control\\PriorityControl";
const SYSTEM_PROFILE: &str =
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion\\Multimedia\\SystemProfile";
const GAMES_TASK: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion\\Multimedia\\SystemProfile\\Tasks\\Games";
const GRAPHICS_DRIVERS: &str = "HKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control\\GraphicsDrivers";
const GRAPHICS_SCHEDULER: &str =
    "HKEY_LOCAL_MACHINE\\SYSTEM\\CurrentControlSet\\Control\\GraphicsDrivers\\Scheduler";
const PSCHED: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\Psched";
const MEDIA_FOUNDATION: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows Media Foundation\\Platform";
const GAME_BAR: &str = "HKEY_CURRENT_USER\\Software\\Microsoft\\GameBar";
const BACKGROUND_APPS: &str =
    "HKEY_CURRENT_USER\\Software\\Microsoft\\Windows\\CurrentVersion\\BackgroundAccessApplications";

pub static ENTRIES: &[ToggleEntry] = &[
    ToggleEntry {
        key: "PrioritizeForegroundApplications",
        name: "Prioritize foreground applications",
        category: TweakCategory::Performance,
        on: Action {
            name: "EnablePrioritizeForegroundApplications",
            steps: &[dword(PRIORITY_CONTROL, "Win32PrioritySeparation", 38)],
        },
        off: Action {
            name: "DisablePrioritizeForegroundApplications",
            steps: &[dword(PRIORITY_CONTROL, "Win32PrioritySeparation", 2)],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "MenuShowDelay",
        name: "Menu show delay",
        category: TweakCategory::Performance,
        on: Action {
            name: "EnableMenuShowDelay",
            steps: &[string("HKEY_CURRENT_USER\\Control Panel\\Desktop", "MenuShowDelay", "400")],
        },
        off: Action {
            name: "DisableMenuShowDelay",
            steps: &[string("HKEY_CURRENT_USER\\Control Panel\\Desktop", "MenuShowDelay", "0")],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "MouseHoverTime",
        name: "Mouse hover delay",
        category: TweakCategory::Performance,
        on: Action {
            name: "EnableMouseHoverTime",
            steps: &[string("HKEY_CURRENT_USER\\Control Panel\\Mouse", "MouseHoverTime", "400")],
        },
        off: Action {
            name: "DisableMouseHoverTime",
            steps: &[string("HKEY_CURRENT_USER\\Control Panel\\Mouse", "MouseHoverTime", "10")],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "BackgroundApps",
        name: "Background apps",
        category: TweakCategory::Performance,
        on: Action {
            name: "EnableBackgroundApps",
            steps: &[
                dword(BACKGROUND_APPS, "GlobalUserDisabled", 0),
                delete_value(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\AppPrivacy",
                    "LetAppsRunInBackground",
                ),
            ],
        },
        off: Action {
            name: "DisableBackgroundApps",
            steps: &[
                dword(BACKGROUND_APPS, "GlobalUserDisabled", 1),
                dword(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\AppPrivacy",
                    "LetAppsRunInBackground",
                    2,
                ),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "SystemProfile",
        name: "Multimedia scheduler tuning",
        category: TweakCategory::Performance,
        on: Action {
            name: "OptimizeSystemProfile",
            steps: &[
                dword(SYSTEM_PROFILE, "SystemResponsiveness", 10),
                dword(SYSTEM_PROFILE, "NetworkThrottlingIndex", 10),
            ],
        },
        off: Action {
            name: "RevertSystemProfile",
            steps: &[
                dword(SYSTEM_PROFILE, "SystemResponsiveness", 20),
                dword(SYSTEM_PROFILE, "NetworkThrottlingIndex", 10),
            ],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "GPUAndPrioritySettings",
        name: "Game task GPU and CPU priority",
        category: TweakCategory::Performance,
        on: Action {
            name: "SetGPUAndPrioritySettings",
            steps: &[
                dword(GAMES_TASK, "GPU Priority", 8),
                dword(GAMES_TASK, "Priority", 6),
                string(GAMES_TASK, "Scheduling Category", "High"),
                string(GAMES_TASK, "SFIO Priority", "High"),
            ],
        },
        off: Action {
            name: "RevertGPUAndPrioritySettings",
            steps: &[
                dword(GAMES_TASK, "GPU Priority", 8),
                dword(GAMES_TASK, "Priority", 2),
                string(GAMES_TASK, "Scheduling Category", "Medium"),
                string(GAMES_TASK, "SFIO Priority", "Normal"),
            ],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "FrameServerMode",
        name: "Camera frame server",
        category: TweakCategory::Performance,
        on: Action {
            name: "EnableFrameServerMode",
            steps: &[delete_value(MEDIA_FOUNDATION, "EnableFrameServerMode")],
        },
        off: Action {
            name: "DisableFrameServerMode",
            steps: &[dword(MEDIA_FOUNDATION, "EnableFrameServerMode", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "LowLatencyGPUSettings",
        name: "Low latency GPU scheduling",
        category: TweakCategory::Performance,
        on: Action {
            name: "SetLowLatencyGPUSettings",
            steps: &[
                dword(GRAPHICS_DRIVERS, "HwSchMode", 2),
                dword(GRAPHICS_SCHEDULER, "EnablePreemption", 0),
            ],
        },
        off: Action {
            name: "RevertLowLatencyGPUSettings",
            steps: &[
                delete_value(GRAPHICS_DRIVERS, "HwSchMode"),
                delete_value(GRAPHICS_SCHEDULER, "EnablePreemption"),
            ],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "NonBestEffortLimit",
        name: "Release reserved network bandwidth",
        category: TweakCategory::Performance,
        on: Action {
            name: "SetNonBestEffortLimit",
            steps: &[dword(PSCHED, "NonBestEffortLimit", 0)],
        },
        off: Action {
            name: "RevertNonBestEffortLimit",
            steps: &[delete_value(PSCHED, "NonBestEffortLimit")],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "GamingMode",
        name: "Game Mode",
        category: TweakCategory::Performance,
        on: Action {
            name: "EnableGamingMode",
            steps: &[
                dword(GAME_BAR, "AllowAutoGameMode", 1),
                dword(GAME_BAR, "AutoGameModeEnabled", 1),
            ],
        },
        off: Action {
            name: "DisableGamingMode",
            steps: &[
                dword(GAME_BAR, "AllowAutoGameMode", 0),
                dword(GAME_BAR, "AutoGameModeEnabled", 0),
            ],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "GameBar",
        name: "Xbox Game Bar",
        category: TweakCategory::Performance,
        on: Action {
            name: "EnableGameBar",
            steps: &[
                dword(GAME_BAR, "UseNexusForGameBarEnabled", 1),
                dword("HKEY_CURRENT_USER\\System\\GameConfigStore", "GameDVR_Enabled", 1),
                delete_value(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\GameDVR",
                    "AllowGameDVR",
                ),
            ],
        },
        off: Action {
            name: "DisableGameBar",
            steps: &[
                dword(GAME_BAR, "UseNexusForGameBarEnabled", 0),
                dword("HKEY_CURRENT_USER\\System\\GameConfigStore", "GameDVR_Enabled", 0),
                dword(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\GameDVR",
                    "AllowGameDVR",
                    0,
                ),
            ],
        },
        default_state: true,
        confirmation: None,
    },
];
