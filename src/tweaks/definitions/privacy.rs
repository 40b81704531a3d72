// src/tweaks/definitions/privacy.rs

use crate::tweaks::{
    step::{delete_value, dword, start, startup, stop, StartupType::*},
    Action, ToggleEntry, TweakCategory,
};

const WINDOWS_SEARCH: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\Windows Search";
const CLOUD_CONTENT: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\CloudContent";
const USER_CLOUD_CONTENT: &str =
    "HKEY_CURRENT_USER\\Software\\Policies\\Microsoft\\Windows\\CloudContent";
const DATA_COLLECTION: &str =
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\DataCollection";
const ADVERTISING_INFO: &str =
    "HKEY_CURRENT_USER\\Software\\Microsoft\\Windows\\CurrentVersion\\AdvertisingInfo";
const TABLET_PC: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\TabletPC";
const HANDWRITING_REPORTS: &str =
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\HandwritingErrorReports";
const INPUT_PERSONALIZATION: &str = "HKEY_CURRENT_USER\\Software\\Microsoft\\InputPersonalization";
const TRAINED_DATA_STORE: &str =
    "HKEY_CURRENT_USER\\Software\\Microsoft\\InputPersonalization\\TrainedDataStore";
const SYSTEM_POLICY: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\System";
const SETTING_SYNC: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\SettingSync";
const MESSAGING: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\Messaging";
const APP_PRIVACY: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\AppPrivacy";
const SPEECH_ONLINE: &str = "HKEY_CURRENT_USER\\Software\\Microsoft\\Speech_OneCore\\Settings\\OnlineSpeechPrivacy";
const LOCATION_POLICY: &str =
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\LocationAndSensors";
const WINDOWS_AI: &str = "HKEY_CURRENT_USER\\Software\\Policies\\Microsoft\\Windows\\WindowsAI";
const COPILOT: &str = "HKEY_CURRENT_USER\\Software\\Policies\\Microsoft\\Windows\\WindowsCopilot";
const SIUF_RULES: &str = "HKEY_CURRENT_USER\\Software\\Microsoft\\Siuf\\Rules";
const BLUETOOTH_POLICY: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\PolicyManager\\current\\device\\Bluetooth";
const SEARCH_SETTINGS: &str =
    "HKEY_CURRENT_USER\\Software\\Microsoft\\Windows\\CurrentVersion\\SearchSettings";
const INK_WORKSPACE: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\WindowsInkWorkspace";
const FIND_MY_DEVICE: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\FindMyDevice";
const TEXT_INPUT: &str = "HKEY_CURRENT_USER\\Software\\Microsoft\\TabletTip\\1.7";
const DIAGNOSTICS_TOAST: &str =
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Diagnostics\\DiagTrack";

pub static ENTRIES: &[ToggleEntry] = &[
    ToggleEntry {
        key: "Cortana",
        name: "Cortana",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableCortana",
            steps: &[
                delete_value(WINDOWS_SEARCH, "AllowCortana"),
                delete_value(WINDOWS_SEARCH, "AllowCloudSearch"),
            ],
        },
        off: Action {
            name: "DisableCortana",
            steps: &[
                dword(WINDOWS_SEARCH, "AllowCortana", 0),
                dword(WINDOWS_SEARCH, "AllowCloudSearch", 0),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "SpotlightFeatures",
        name: "Windows Spotlight",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableSpotlightFeatures",
            steps: &[delete_value(USER_CLOUD_CONTENT, "DisableWindowsSpotlightFeatures")],
        },
        off: Action {
            name: "DisableSpotlightFeatures",
            steps: &[dword(USER_CLOUD_CONTENT, "DisableWindowsSpotlightFeatures", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "TailoredExperiences",
        name: "Tailored experiences",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableTailoredExperiences",
            steps: &[delete_value(USER_CLOUD_CONTENT, "DisableTailoredExperiencesWithDiagnosticData")],
        },
        off: Action {
            name: "DisableTailoredExperiences",
            steps: &[dword(USER_CLOUD_CONTENT, "DisableTailoredExperiencesWithDiagnosticData", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "CloudOptimizedContent",
        name: "Cloud optimized content",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableCloudOptimizedContent",
            steps: &[
                delete_value(CLOUD_CONTENT, "DisableCloudOptimizedContent"),
                delete_value(CLOUD_CONTENT, "DisableConsumerAccountStateContent"),
                delete_value(CLOUD_CONTENT, "DisableWindowsConsumerFeatures"),
            ],
        },
        off: Action {
            name: "DisableCloudOptimizedContent",
            steps: &[
                dword(CLOUD_CONTENT, "DisableCloudOptimizedContent", 1),
                dword(CLOUD_CONTENT, "DisableConsumerAccountStateContent", 1),
                dword(CLOUD_CONTENT, "DisableWindowsConsumerFeatures", 1),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "FeedbackNotifications",
        name: "Feedback requests",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableFeedbackNotifications",
            steps: &[
                delete_value(DATA_COLLECTION, "DoNotShowFeedbackNotifications"),
                delete_value(SIUF_RULES, "NumberOfSIUFInPeriod"),
            ],
        },
        off: Action {
            name: "DisableFeedbackNotifications",
            steps: &[
                dword(DATA_COLLECTION, "DoNotShowFeedbackNotifications", 1),
                dword(SIUF_RULES, "NumberOfSIUFInPeriod", 0),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "AdvertisingID",
        name: "Advertising ID",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableAdvertisingID",
            steps: &[
                dword(ADVERTISING_INFO, "Enabled", 1),
                delete_value(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\AdvertisingInfo",
                    "DisabledByGroupPolicy",
                ),
            ],
        },
        off: Action {
            name: "DisableAdvertisingID",
            steps: &[
                dword(ADVERTISING_INFO, "Enabled", 0),
                dword(
                    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\AdvertisingInfo",
                    "DisabledByGroupPolicy",
                    1,
                ),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "BluetoothAdvertising",
        name: "Bluetooth advertising",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableBluetoothAdvertising",
            steps: &[dword(BLUETOOTH_POLICY, "AllowAdvertising", 1)],
        },
        off: Action {
            name: "DisableBluetoothAdvertising",
            steps: &[dword(BLUETOOTH_POLICY, "AllowAdvertising", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "HandwritingDataSharing",
        name: "Handwriting data sharing",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableHandwritingDataSharing",
            steps: &[
                delete_value(TABLET_PC, "PreventHandwritingDataSharing"),
                delete_value(HANDWRITING_REPORTS, "PreventHandwritingErrorReports"),
            ],
        },
        off: Action {
            name: "DisableHandwritingDataSharing",
            steps: &[
                dword(TABLET_PC, "PreventHandwritingDataSharing", 1),
                dword(HANDWRITING_REPORTS, "PreventHandwritingErrorReports", 1),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "TextInputDataCollection",
        name: "Typing insights",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableTextInputDataCollection",
            steps: &[
                dword(TEXT_INPUT, "EnableTextPrediction", 1),
                dword(TEXT_INPUT, "EnableInkingWithTouch", 1),
            ],
        },
        off: Action {
            name: "DisableTextInputDataCollection",
            steps: &[
                dword(TEXT_INPUT, "EnableTextPrediction", 0),
                dword(TEXT_INPUT, "EnableInkingWithTouch", 0),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "InputPersonalization",
        name: "Inking and typing personalization",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableInputPersonalization",
            steps: &[
                dword(INPUT_PERSONALIZATION, "RestrictImplicitInkCollection", 0),
                dword(INPUT_PERSONALIZATION, "RestrictImplicitTextCollection", 0),
                dword(TRAINED_DATA_STORE, "HarvestContacts", 1),
            ],
        },
        off: Action {
            name: "DisableInputPersonalization",
            steps: &[
                dword(INPUT_PERSONALIZATION, "RestrictImplicitInkCollection", 1),
                dword(INPUT_PERSONALIZATION, "RestrictImplicitTextCollection", 1),
                dword(TRAINED_DATA_STORE, "HarvestContacts", 0),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "SafeSearchMode",
        name: "Safe search",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableSafeSearchMode",
            steps: &[dword(SEARCH_SETTINGS, "SafeSearchMode", 1)],
        },
        off: Action {
            name: "DisableSafeSearchMode",
            steps: &[dword(SEARCH_SETTINGS, "SafeSearchMode", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "ActivityUploads",
        name: "Activity history uploads",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableActivityUploads",
            steps: &[delete_value(SYSTEM_POLICY, "UploadUserActivities")],
        },
        off: Action {
            name: "DisableActivityUploads",
            steps: &[dword(SYSTEM_POLICY, "UploadUserActivities", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "ActivityFeed",
        name: "Activity feed",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableActivityFeed",
            steps: &[
                delete_value(SYSTEM_POLICY, "EnableActivityFeed"),
                delete_value(SYSTEM_POLICY, "PublishUserActivities"),
            ],
        },
        off: Action {
            name: "DisableActivityFeed",
            steps: &[
                dword(SYSTEM_POLICY, "EnableActivityFeed", 0),
                dword(SYSTEM_POLICY, "PublishUserActivities", 0),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "ClipboardSync",
        name: "Clipboard history",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableClipboardSync",
            steps: &[delete_value(SYSTEM_POLICY, "AllowClipboardHistory")],
        },
        off: Action {
            name: "DisableClipboardSync",
            steps: &[dword(SYSTEM_POLICY, "AllowClipboardHistory", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "CloudClipboard",
        name: "Cloud clipboard",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableCloudClipboard",
            steps: &[delete_value(SYSTEM_POLICY, "AllowCrossDeviceClipboard")],
        },
        off: Action {
            name: "DisableCloudClipboard",
            steps: &[dword(SYSTEM_POLICY, "AllowCrossDeviceClipboard", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "MessageSync",
        name: "Message sync",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableMessageSync",
            steps: &[delete_value(MESSAGING, "AllowMessageSync")],
        },
        off: Action {
            name: "DisableMessageSync",
            steps: &[dword(MESSAGING, "AllowMessageSync", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "SettingSync",
        name: "Settings sync",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableSettingSync",
            steps: &[
                delete_value(SETTING_SYNC, "DisableSettingSync"),
                delete_value(SETTING_SYNC, "DisableSettingSyncUserOverride"),
            ],
        },
        off: Action {
            name: "DisableSettingSync",
            steps: &[
                dword(SETTING_SYNC, "DisableSettingSync", 2),
                dword(SETTING_SYNC, "DisableSettingSyncUserOverride", 1),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "VoiceActivation",
        name: "Voice activation for apps",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableVoiceActivation",
            steps: &[delete_value(APP_PRIVACY, "LetAppsActivateWithVoice")],
        },
        off: Action {
            name: "DisableVoiceActivation",
            steps: &[dword(APP_PRIVACY, "LetAppsActivateWithVoice", 2)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "FindMyDevice",
        name: "Find My Device",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableFindMyDevice",
            steps: &[delete_value(FIND_MY_DEVICE, "AllowFindMyDevice")],
        },
        off: Action {
            name: "DisableFindMyDevice",
            steps: &[dword(FIND_MY_DEVICE, "AllowFindMyDevice", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "Cdp",
        name: "Connected devices platform",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableCdp",
            steps: &[
                delete_value(SYSTEM_POLICY, "EnableCdp"),
                startup("CDPSvc", Automatic),
                start("CDPSvc"),
            ],
        },
        off: Action {
            name: "DisableCdp",
            steps: &[
                dword(SYSTEM_POLICY, "EnableCdp", 0),
                stop("CDPSvc"),
                startup("CDPSvc", Disabled),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "DiagnosticsToast",
        name: "Diagnostic data notifications",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableDiagnosticsToast",
            steps: &[delete_value(DIAGNOSTICS_TOAST, "ShowedToastAtLevel")],
        },
        off: Action {
            name: "DisableDiagnosticsToast",
            steps: &[dword(DIAGNOSTICS_TOAST, "ShowedToastAtLevel", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "OnlineSpeechPrivacy",
        name: "Online speech recognition",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableOnlineSpeechPrivacy",
            steps: &[dword(SPEECH_ONLINE, "HasAccepted", 1)],
        },
        off: Action {
            name: "DisableOnlineSpeechPrivacy",
            steps: &[dword(SPEECH_ONLINE, "HasAccepted", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "LocationFeatures",
        name: "Location services",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableLocationFeatures",
            steps: &[
                delete_value(LOCATION_POLICY, "DisableLocation"),
                delete_value(LOCATION_POLICY, "DisableWindowsLocationProvider"),
                delete_value(LOCATION_POLICY, "DisableLocationScripting"),
                startup("lfsvc", Manual),
            ],
        },
        off: Action {
            name: "DisableLocationFeatures",
            steps: &[
                dword(LOCATION_POLICY, "DisableLocation", 1),
                dword(LOCATION_POLICY, "DisableWindowsLocationProvider", 1),
                dword(LOCATION_POLICY, "DisableLocationScripting", 1),
                stop("lfsvc"),
                startup("lfsvc", Disabled),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "WindowsInk",
        name: "Windows Ink Workspace",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableWindowsInk",
            steps: &[
                delete_value(INK_WORKSPACE, "AllowWindowsInkWorkspace"),
                delete_value(INK_WORKSPACE, "AllowSuggestedAppsInWindowsInkWorkspace"),
            ],
        },
        off: Action {
            name: "DisableWindowsInk",
            steps: &[
                dword(INK_WORKSPACE, "AllowWindowsInkWorkspace", 0),
                dword(INK_WORKSPACE, "AllowSuggestedAppsInWindowsInkWorkspace", 0),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "SpellingAndTypingFeatures",
        name: "Autocorrect and text suggestions",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableSpellingAndTypingFeatures",
            steps: &[
                dword(TEXT_INPUT, "EnableAutocorrection", 1),
                dword(TEXT_INPUT, "EnableSpellchecking", 1),
                dword(TEXT_INPUT, "EnableDoubleTapSpace", 1),
            ],
        },
        off: Action {
            name: "DisableSpellingAndTypingFeatures",
            steps: &[
                dword(TEXT_INPUT, "EnableAutocorrection", 0),
                dword(TEXT_INPUT, "EnableSpellchecking", 0),
                dword(TEXT_INPUT, "EnableDoubleTapSpace", 0),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "CoPilotAI",
        name: "Copilot",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableCoPilotAI",
            steps: &[delete_value(COPILOT, "TurnOffWindowsCopilot")],
        },
        off: Action {
            name: "DisableCoPilotAI",
            steps: &[dword(COPILOT, "TurnOffWindowsCopilot", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "WindowsRecall",
        name: "Recall snapshots",
        category: TweakCategory::Privacy,
        on: Action {
            name: "EnableWindowsRecall",
            steps: &[delete_value(WINDOWS_AI, "DisableAIDataAnalysis")],
        },
        off: Action {
            name: "DisableWindowsRecall",
            steps: &[dword(WINDOWS_AI, "DisableAIDataAnalysis", 1)],
        },
        default_state: true,
        confirmation: None,
    },
];
