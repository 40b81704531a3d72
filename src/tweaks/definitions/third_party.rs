// src/tweaks/definitions/third_party.rs

use crate::tweaks::{
    step::{delete_value, dword, start, startup, stop, StartupType::*},
    Action, ToggleEntry, TweakCategory,
};

const EDGE_POLICY: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Edge";
const VS_SQM: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\VisualStudio\\SQM";
const VS_FEEDBACK: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\VisualStudio\\Feedback";
const CHROME_POLICY: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Google\\Chrome";
const FIREFOX_POLICY: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Mozilla\\Firefox";
const ONEDRIVE_POLICY: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\OneDrive";

pub static ENTRIES: &[ToggleEntry] = &[
    ToggleEntry {
        key: "OneDrive",
        name: "OneDrive",
        category: TweakCategory::ThirdParty,
        on: Action {
            name: "EnableOneDrive",
            steps: &[delete_value(ONEDRIVE_POLICY, "DisableFileSyncNGSC")],
        },
        off: Action {
            name: "DisableOneDrive",
            steps: &[dword(ONEDRIVE_POLICY, "DisableFileSyncNGSC", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "EdgeDiscoverBar",
        name: "Edge sidebar",
        category: TweakCategory::ThirdParty,
        on: Action {
            name: "EnableEdgeDiscoverBar",
            steps: &[delete_value(EDGE_POLICY, "HubsSidebarEnabled")],
        },
        off: Action {
            name: "DisableEdgeDiscoverBar",
            steps: &[dword(EDGE_POLICY, "HubsSidebarEnabled", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "EdgeTelemetry",
        name: "Edge telemetry",
        category: TweakCategory::ThirdParty,
        on: Action {
            name: "EnableEdgeTelemetry",
            steps: &[
                delete_value(EDGE_POLICY, "DiagnosticData"),
                delete_value(EDGE_POLICY, "PersonalizationReportingEnabled"),
                delete_value(EDGE_POLICY, "MetricsReportingEnabled"),
            ],
        },
        off: Action {
            name: "DisableEdgeTelemetry",
            steps: &[
                dword(EDGE_POLICY, "DiagnosticData", 0),
                dword(EDGE_POLICY, "PersonalizationReportingEnabled", 0),
                dword(EDGE_POLICY, "MetricsReportingEnabled", 0),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "VisualStudioTelemetry",
        name: "Visual Studio telemetry",
        category: TweakCategory::ThirdParty,
        on: Action {
            name: "EnableVisualStudioTelemetry",
            steps: &[
                delete_value(VS_SQM, "OptIn"),
                delete_value(VS_FEEDBACK, "DisableFeedbackDialog"),
                delete_value(VS_FEEDBACK, "DisableScreenshotCapture"),
            ],
        },
        off: Action {
            name: "DisableVisualStudioTelemetry",
            steps: &[
                dword(VS_SQM, "OptIn", 0),
                dword(VS_FEEDBACK, "DisableFeedbackDialog", 1),
                dword(VS_FEEDBACK, "DisableScreenshotCapture", 1),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "NvidiaTelemetry",
        name: "NVIDIA telemetry",
        category: TweakCategory::ThirdParty,
        on: Action {
            name: "EnableNvidiaTelemetry",
            steps: &[
                delete_value(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\NVIDIA Corporation\\NvControlPanel2\\Client",
                    "OptInOrOutPreference",
                ),
                startup("NvTelemetryContainer", Automatic),
                start("NvTelemetryContainer"),
            ],
        },
        off: Action {
            name: "DisableNvidiaTelemetry",
            steps: &[
                dword(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\NVIDIA Corporation\\NvControlPanel2\\Client",
                    "OptInOrOutPreference",
                    0,
                ),
                stop("NvTelemetryContainer"),
                startup("NvTelemetryContainer", Disabled),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "ChromeTelemetry",
        name: "Chrome telemetry",
        category: TweakCategory::ThirdParty,
        on: Action {
            name: "EnableChromeTelemetry",
            steps: &[
                delete_value(CHROME_POLICY, "MetricsReportingEnabled"),
                delete_value(CHROME_POLICY, "ChromeCleanupReportingEnabled"),
                delete_value(CHROME_POLICY, "UserFeedbackAllowed"),
            ],
        },
        off: Action {
            name: "DisableChromeTelemetry",
            steps: &[
                dword(CHROME_POLICY, "MetricsReportingEnabled", 0),
                dword(CHROME_POLICY, "ChromeCleanupReportingEnabled", 0),
                dword(CHROME_POLICY, "UserFeedbackAllowed", 0),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "FirefoxTelemetry",
        name: "Firefox telemetry",
        category: TweakCategory::ThirdParty,
        on: Action {
            name: "EnableFirefoxTelemetry",
            steps: &[
                delete_value(FIREFOX_POLICY, "DisableTelemetry"),
                delete_value(FIREFOX_POLICY, "DisableDefaultBrowserAgent"),
            ],
        },
        off: Action {
            name: "DisableFirefoxTelemetry",
            steps: &[
                dword(FIREFOX_POLICY, "DisableTelemetry", 1),
                dword(FIREFOX_POLICY, "DisableDefaultBrowserAgent", 1),
            ],
        },
        default_state: true,
        confirmation: None,
    },
];
