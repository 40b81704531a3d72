// src/tweaks/definitions/interface.rs

use crate::tweaks::{
    step::{delete_key, delete_value, dword, string},
    Action, ToggleEntry, TweakCategory,
};

const ADVANCED: &str =
    "HKEY_CURRENT_USER\\Software\\Microsoft\\Windows\\CurrentVersion\\Explorer\\Advanced";
const EXPLORER: &str = "HKEY_CURRENT_USER\\Software\\Microsoft\\Windows\\CurrentVersion\\Explorer";
const AUTO_COMPLETE: &str =
    "HKEY_CURRENT_USER\\Software\\Microsoft\\Windows\\CurrentVersion\\Explorer\\AutoComplete";
const PERSONALIZE: &str =
    "HKEY_CURRENT_USER\\Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize";
const EXPLORER_POLICY: &str = "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Windows\\Explorer";
const USER_EXPLORER_POLICY: &str =
    "HKEY_CURRENT_USER\\Software\\Policies\\Microsoft\\Windows\\Explorer";
const COPY_TO_HANDLER: &str =
    "HKEY_CLASSES_ROOT\\AllFilesystemObjects\\shellex\\ContextMenuHandlers\\Copy To";
const MOVE_TO_HANDLER: &str =
    "HKEY_CLASSES_ROOT\\AllFilesystemObjects\\shellex\\ContextMenuHandlers\\Move To";
const CLASSIC_MENU_CLSID: &str =
    "HKEY_CURRENT_USER\\Software\\Classes\\CLSID\\{86ca1aa0-34aa-4e8b-a509-50c905bae2a2}";
const CLASSIC_MENU_SERVER: &str = "HKEY_CURRENT_USER\\Software\\Classes\\CLSID\\{86ca1aa0-34aa-4e8b-a509-50c905bae2a2}\\InprocServer32";
const BLOCKED_SHELL_EXTENSIONS: &str =
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Shell Extensions\\Blocked";
const CAST_TO_DEVICE: &str = "{7AD84985-87B4-4a16-BE58-8B72A5B390F7}";
const STICKY_KEYS: &str = "HKEY_CURRENT_USER\\Control Panel\\Accessibility\\StickyKeys";
const TASKBAR_DEVELOPER: &str = "HKEY_CURRENT_USER\\Software\\Microsoft\\Windows\\CurrentVersion\\Explorer\\Advanced\\TaskbarDeveloperSettings";

pub static ENTRIES: &[ToggleEntry] = &[
    ToggleEntry {
        key: "RecommendedSectionStartMenu",
        name: "Start menu Recommended section",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableRecommendedSectionStartMenu",
            steps: &[delete_value(EXPLORER_POLICY, "HideRecommendedSection")],
        },
        off: Action {
            name: "DisableRecommendedSectionStartMenu",
            steps: &[dword(EXPLORER_POLICY, "HideRecommendedSection", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "AutoComplete",
        name: "Explorer autocomplete",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableAutoComplete",
            steps: &[
                string(AUTO_COMPLETE, "Append Completion", "yes"),
                string(AUTO_COMPLETE, "AutoSuggest", "yes"),
            ],
        },
        off: Action {
            name: "DisableAutoComplete",
            steps: &[
                string(AUTO_COMPLETE, "Append Completion", "no"),
                string(AUTO_COMPLETE, "AutoSuggest", "no"),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "WindowShake",
        name: "Shake to minimize",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableWindowShake",
            steps: &[dword(ADVANCED, "DisallowShaking", 0)],
        },
        off: Action {
            name: "DisableWindowShake",
            steps: &[dword(ADVANCED, "DisallowShaking", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "CopyMoveContextMenu",
        name: "Copy To / Move To in context menu",
        category: TweakCategory::Interface,
        on: Action {
            name: "AddCopyMoveContextMenu",
            steps: &[
                string(COPY_TO_HANDLER, "", "{C2FBB630-2971-11D1-A18C-00C04FD75D13}"),
                string(MOVE_TO_HANDLER, "", "{C2FBB631-2971-11D1-A18C-00C04FD75D13}"),
            ],
        },
        off: Action {
            name: "RemoveCopyMoveContextMenu",
            steps: &[delete_key(COPY_TO_HANDLER), delete_key(MOVE_TO_HANDLER)],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "FileExtensionsAndHiddenFiles",
        name: "Show file extensions and hidden files",
        category: TweakCategory::Interface,
        on: Action {
            name: "ShowFileExtensionsAndHiddenFiles",
            steps: &[dword(ADVANCED, "HideFileExt", 0), dword(ADVANCED, "Hidden", 1)],
        },
        off: Action {
            name: "HideFileExtensionsAndHiddenFiles",
            steps: &[dword(ADVANCED, "HideFileExt", 1), dword(ADVANCED, "Hidden", 2)],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "WindowsTransparency",
        name: "Transparency effects",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableWindowsTransparency",
            steps: &[dword(PERSONALIZE, "EnableTransparency", 1)],
        },
        off: Action {
            name: "DisableWindowsTransparency",
            steps: &[dword(PERSONALIZE, "EnableTransparency", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "WindowsDarkMode",
        name: "Dark mode",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableWindowsDarkMode",
            steps: &[
                dword(PERSONALIZE, "AppsUseLightTheme", 0),
                dword(PERSONALIZE, "SystemUsesLightTheme", 0),
            ],
        },
        off: Action {
            name: "DisableWindowsDarkMode",
            steps: &[
                dword(PERSONALIZE, "AppsUseLightTheme", 1),
                dword(PERSONALIZE, "SystemUsesLightTheme", 1),
            ],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "ClassicContextMenu",
        name: "Classic context menu",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableClassicContextMenu",
            steps: &[string(CLASSIC_MENU_SERVER, "", "")],
        },
        off: Action {
            name: "DisableClassicContextMenu",
            steps: &[delete_key(CLASSIC_MENU_CLSID)],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "QuickAccessHistory",
        name: "Recent files in Quick Access",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableQuickAccessHistory",
            steps: &[dword(EXPLORER, "ShowRecent", 1), dword(EXPLORER, "ShowFrequent", 1)],
        },
        off: Action {
            name: "DisableQuickAccessHistory",
            steps: &[dword(EXPLORER, "ShowRecent", 0), dword(EXPLORER, "ShowFrequent", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "MyPeople",
        name: "People bar",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableMyPeople",
            steps: &[delete_value(USER_EXPLORER_POLICY, "HidePeopleBar")],
        },
        off: Action {
            name: "DisableMyPeople",
            steps: &[dword(USER_EXPLORER_POLICY, "HidePeopleBar", 1)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "NewsAndInterests",
        name: "News and interests",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableNewsAndInterests",
            steps: &[delete_value(
                "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Dsh",
                "AllowNewsAndInterests",
            )],
        },
        off: Action {
            name: "DisableNewsAndInterests",
            steps: &[dword(
                "HKEY_LOCAL_MACHINE\\SOFTWARE\\Policies\\Microsoft\\Dsh",
                "AllowNewsAndInterests",
                0,
            )],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "StickyKeys",
        name: "Sticky Keys shortcut",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableStickyKeys",
            steps: &[string(STICKY_KEYS, "Flags", "510")],
        },
        off: Action {
            name: "DisableStickyKeys",
            steps: &[string(STICKY_KEYS, "Flags", "506")],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "CastToDevice",
        name: "Cast to Device in context menu",
        category: TweakCategory::Interface,
        on: Action {
            name: "AddCastToDevice",
            steps: &[delete_value(BLOCKED_SHELL_EXTENSIONS, CAST_TO_DEVICE)],
        },
        off: Action {
            name: "RemoveCastToDevice",
            steps: &[string(BLOCKED_SHELL_EXTENSIONS, CAST_TO_DEVICE, "")],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "TaskbarToLeft",
        name: "Left-aligned taskbar",
        category: TweakCategory::Interface,
        on: Action {
            name: "AlignTaskbarToLeft",
            steps: &[dword(ADVANCED, "TaskbarAl", 0)],
        },
        off: Action {
            name: "AlignTaskbarToCenter",
            steps: &[dword(ADVANCED, "TaskbarAl", 1)],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "SnapAssist",
        name: "Snap Assist",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableSnapAssist",
            steps: &[
                dword(ADVANCED, "SnapAssist", 1),
                dword(ADVANCED, "EnableSnapAssistFlyout", 1),
            ],
        },
        off: Action {
            name: "DisableSnapAssist",
            steps: &[
                dword(ADVANCED, "SnapAssist", 0),
                dword(ADVANCED, "EnableSnapAssistFlyout", 0),
            ],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "Widgets",
        name: "Taskbar widgets",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableWidgets",
            steps: &[dword(ADVANCED, "TaskbarDa", 1)],
        },
        off: Action {
            name: "DisableWidgets",
            steps: &[dword(ADVANCED, "TaskbarDa", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "Chat",
        name: "Taskbar chat",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableChat",
            steps: &[dword(ADVANCED, "TaskbarMn", 1)],
        },
        off: Action {
            name: "DisableChat",
            steps: &[dword(ADVANCED, "TaskbarMn", 0)],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "FilesCompactMode",
        name: "Compact Explorer view",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableFilesCompactMode",
            steps: &[dword(ADVANCED, "UseCompactMode", 1)],
        },
        off: Action {
            name: "DisableFilesCompactMode",
            steps: &[dword(ADVANCED, "UseCompactMode", 0)],
        },
        default_state: false,
        confirmation: None,
    },
    ToggleEntry {
        key: "Stickers",
        name: "Desktop stickers",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableStickers",
            steps: &[dword(
                "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\PolicyManager\\current\\device\\Stickers",
                "EnableStickers",
                1,
            )],
        },
        off: Action {
            name: "DisableStickers",
            steps: &[dword(
                "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\PolicyManager\\current\\device\\Stickers",
                "EnableStickers",
                0,
            )],
        },
        default_state: true,
        confirmation: None,
    },
    ToggleEntry {
        key: "EndTask",
        name: "End task in taskbar menu",
        category: TweakCategory::Interface,
        on: Action {
            name: "EnableEndTask",
            steps: &[dword(TASKBAR_DEVELOPER, "TaskbarEndTask", 1)],
        },
        off: Action {
            name: "DisableEndTask",
            steps: &[dword(TASKBAR_DEVELOPER, "TaskbarEndTask", 0)],
        },
        default_state: false,
        confirmation: None,
    },
];
