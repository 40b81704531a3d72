// src/apps.rs

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// An installed application as shown in the apps list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRecord {
    pub name: String,
    pub icon_path: Option<PathBuf>,
    pub is_win32: bool,
}

/// Removes duplicate names (first record wins) and sorts by name.
pub fn merge_app_records<I>(records: I) -> Vec<AppRecord>
where
    I: IntoIterator<Item = AppRecord>,
{
    let mut by_name: IndexMap<String, AppRecord> = IndexMap::new();
    for record in records {
        by_name.entry(record.name.clone()).or_insert(record);
    }
    let mut merged: Vec<AppRecord> = by_name.into_values().collect();
    merged.sort_by(|a, b| a.name.cmp(&b.name));
    merged
}

/// Parses `Get-AppxPackage | Select-Object Name,InstallLocation | Format-List`
/// output into `(name, install_location)` pairs.
///
/// Long locations are wrapped by PowerShell onto indented continuation lines.
/// Packages without a location are skipped.
pub fn parse_appx_listing(output: &str) -> Vec<(String, String)> {
    let mut packages = Vec::new();
    let mut name: Option<String> = None;
    let mut location: Option<String> = None;

    let mut flush = |name: &mut Option<String>, location: &mut Option<String>| {
        if let (Some(n), Some(l)) = (name.take(), location.take()) {
            if !n.is_empty() && !l.is_empty() {
                packages.push((n, l));
            }
        }
    };

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        if line.starts_with("Name") {
            flush(&mut name, &mut location);
            name = field_value(line);
        } else if line.starts_with("InstallLocation") {
            location = field_value(line);
        } else if line.starts_with(' ') {
            if let Some(current) = location.as_mut().filter(|l| !l.is_empty()) {
                current.push(' ');
                current.push_str(line.trim());
            }
        }
    }
    flush(&mut name, &mut location);

    packages
}

fn field_value(line: &str) -> Option<String> {
    line.split_once(':').map(|(_, value)| value.trim().to_string())
}

/// Cleans an `InstallLocation` / `UninstallString` value down to a directory.
pub fn install_directory(raw: &str) -> Option<PathBuf> {
    let cleaned = raw.replace('"', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    if cleaned.to_lowercase().contains(".exe") {
        // `Path::parent` only splits on '/' off Windows
        return cleaned
            .rsplit_once(['\\', '/'])
            .map(|(dir, _)| PathBuf::from(dir))
            .filter(|dir| !dir.as_os_str().is_empty());
    }
    Some(PathBuf::from(cleaned))
}

/// Looks for an icon file shipped next to a desktop application.
pub fn win32_icon_path(install_dir: &Path) -> Option<PathBuf> {
    ["app.ico", "icon.png"]
        .iter()
        .map(|file| install_dir.join(file))
        .find(|candidate| candidate.is_file())
}

#[cfg(windows)]
pub use self::win::*;

/// There is nothing to list off Windows.
#[cfg(not(windows))]
pub fn installed_apps(_uninstallable_only: bool) -> anyhow::Result<Vec<AppRecord>> {
    Ok(Vec::new())
}

#[cfg(windows)]
mod win {
    use std::{os::windows::process::CommandExt, process::Command};

    use anyhow::{Context, Result};
    use tracing::{debug, warn};
    use windows::Win32::System::Threading::CREATE_NO_WINDOW;
    use winreg::{
        enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ},
        RegKey,
    };

    use super::*;

    const UNINSTALL_PATH: &str = "SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Uninstall";

    /// Desktop applications registered under the machine and user Uninstall keys.
    pub fn win32_apps() -> Result<Vec<AppRecord>> {
        let mut records = Vec::new();

        for hive in [HKEY_LOCAL_MACHINE, HKEY_CURRENT_USER] {
            let root = match RegKey::predef(hive).open_subkey_with_flags(UNINSTALL_PATH, KEY_READ) {
                Ok(key) => key,
                Err(e) => {
                    debug!("Uninstall key not readable: {}", e);
                    continue;
                }
            };

            for subkey_name in root.enum_keys().filter_map(|k| k.ok()) {
                let Ok(subkey) = root.open_subkey_with_flags(&subkey_name, KEY_READ) else {
                    warn!("Failed to open uninstall entry '{}'", subkey_name);
                    continue;
                };

                let display_name: String = subkey.get_value("DisplayName").unwrap_or_default();
                let system_component: u32 = subkey.get_value("SystemComponent").unwrap_or(0);
                if display_name.is_empty()
                    || system_component == 1
                    || display_name.to_lowercase().contains("edge")
                {
                    continue;
                }

                let install_location: String =
                    subkey.get_value("InstallLocation").unwrap_or_default();
                let uninstall_string: String =
                    subkey.get_value("UninstallString").unwrap_or_default();
                let dir = install_directory(&install_location)
                    .or_else(|| install_directory(&uninstall_string));

                records.push(AppRecord {
                    name: display_name,
                    icon_path: dir.as_deref().and_then(win32_icon_path),
                    is_win32: true,
                });
            }
        }

        Ok(merge_app_records(records))
    }

    /// Store packages reported by `Get-AppxPackage`.
    pub fn uwp_apps(uninstallable_only: bool) -> Result<Vec<AppRecord>> {
        let filter = if uninstallable_only {
            " | Where-Object { $_.NonRemovable -eq $false }"
        } else {
            ""
        };
        let script = format!(
            "Get-AppxPackage -AllUsers{} | Select-Object Name,InstallLocation | Format-List",
            filter
        );

        let output = Command::new("powershell.exe")
            .args(["-NoProfile", "-Command", &script])
            .creation_flags(CREATE_NO_WINDOW.0)
            .output()
            .context("Failed to run Get-AppxPackage")?;
        if !output.status.success() {
            anyhow::bail!(
                "Get-AppxPackage failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        Ok(parse_appx_listing(&listing)
            .into_iter()
            .map(|(name, _location)| AppRecord {
                name,
                icon_path: None,
                is_win32: false,
            })
            .collect())
    }

    /// Store and desktop applications combined, deduplicated and sorted.
    pub fn installed_apps(uninstallable_only: bool) -> Result<Vec<AppRecord>> {
        let uwp = uwp_apps(uninstallable_only).unwrap_or_else(|e| {
            warn!("Failed to list store apps: {:#}", e);
            Vec::new()
        });
        let win32 = win32_apps()?;
        Ok(merge_app_records(uwp.into_iter().chain(win32)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, is_win32: bool) -> AppRecord {
        AppRecord {
            name: name.to_string(),
            icon_path: None,
            is_win32,
        }
    }

    #[test]
    fn test_merge_dedupes_and_sorts() {
        let merged = merge_app_records(vec![
            record("Zoom", true),
            record("Calculator", false),
            record("Zoom", false),
            record("Audacity", true),
        ]);
        let names: Vec<_> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Audacity", "Calculator", "Zoom"]);
        assert!(merged[2].is_win32);
    }

    #[test]
    fn test_parse_appx_listing() {
        let output = [
            "",
            "Name            : Microsoft.WindowsCalculator",
            "InstallLocation : C:\\Program Files\\WindowsApps\\Microsoft.WindowsCalculator_11.2307",
            "",
            "Name            : Microsoft.NoLocation",
            "",
            "Name            : Microsoft.LongPath",
            "InstallLocation : C:\\Program Files\\WindowsApps\\Microsoft.LongPath_1.0.0.0_x64_",
            "                  _8wekyb3d8bbwe",
        ]
        .join("\r\n");

        let packages = parse_appx_listing(&output);
        assert_eq!(
            packages,
            vec![
                (
                    "Microsoft.WindowsCalculator".to_string(),
                    "C:\\Program Files\\WindowsApps\\Microsoft.WindowsCalculator_11.2307".to_string()
                ),
                (
                    "Microsoft.LongPath".to_string(),
                    "C:\\Program Files\\WindowsApps\\Microsoft.LongPath_1.0.0.0_x64_ _8wekyb3d8bbwe"
                        .to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(parse_appx_listing("").is_empty());
    }

    #[test]
    fn test_install_directory() {
        assert_eq!(
            install_directory("\"C:\\Program Files\\App\\uninstall.exe\""),
            Some(PathBuf::from("C:\\Program Files\\App"))
        );
        assert_eq!(
            install_directory("C:\\Tools\\Thing"),
            Some(PathBuf::from("C:\\Tools\\Thing"))
        );
        assert_eq!(install_directory("  "), None);
        assert_eq!(install_directory("setup.exe"), None);
    }

    #[test]
    fn test_win32_icon_lookup() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(win32_icon_path(dir.path()), None);

        std::fs::write(dir.path().join("icon.png"), b"png").unwrap();
        assert_eq!(win32_icon_path(dir.path()), Some(dir.path().join("icon.png")));

        std::fs::write(dir.path().join("app.ico"), b"ico").unwrap();
        assert_eq!(win32_icon_path(dir.path()), Some(dir.path().join("app.ico")));
    }
}
