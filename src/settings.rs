// src/settings.rs

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};

use crate::{config::SettingsBackend, constants::TOGGLE_STATE_NAMESPACE};

/// Key/value persistence for the revert ledger and the per-toggle UI state.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Opens the store selected in the config.
pub fn open_store(backend: SettingsBackend) -> Result<Arc<dyn SettingsStore>> {
    match backend {
        SettingsBackend::File => Ok(Arc::new(FileStore::default_location()?)),
        #[cfg(windows)]
        SettingsBackend::Registry => Ok(Arc::new(RegistryStore::new())),
        #[cfg(not(windows))]
        SettingsBackend::Registry => {
            tracing::warn!("Registry settings are only available on Windows, using a file.");
            Ok(Arc::new(FileStore::default_location()?))
        }
    }
}

fn toggle_state_key(key: &str) -> String {
    format!("{}.{}", TOGGLE_STATE_NAMESPACE, key)
}

/// Last UI state stored for a toggle. `None` if nothing (or garbage) is stored.
pub fn load_toggle_state(store: &dyn SettingsStore, key: &str) -> Result<Option<bool>> {
    Ok(match store.get(&toggle_state_key(key))?.as_deref() {
        Some("1") => Some(true),
        Some("0") => Some(false),
        Some(other) => {
            tracing::warn!("{} -> Ignoring stored UI state '{}'.", key, other);
            None
        }
        None => None,
    })
}

pub fn save_toggle_state(store: &dyn SettingsStore, key: &str, on: bool) -> Result<()> {
    store.set(&toggle_state_key(key), if on { "1" } else { "0" })
}

/// Process-local store, mostly for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores settings as a flat TOML table. Every write replaces the file atomically.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `<config_dir>/tunex/settings.toml`
    pub fn default_location() -> Result<Self> {
        let mut path = dirs::config_dir().context("No config directory on this system")?;
        path.push("tunex");
        path.push("settings.toml");
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read '{}'", self.path.display()))
            }
        };
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse '{}'", self.path.display()))
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create '{}'", parent.display()))?;
        }
        let contents = toml::to_string(values).context("Failed to serialize settings")?;
        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write '{}'", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace '{}'", self.path.display()))
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

/// Stores settings as string values under `HKEY_CURRENT_USER\Software\TuneX`.
#[cfg(windows)]
#[derive(Debug, Default)]
pub struct RegistryStore;

#[cfg(windows)]
impl RegistryStore {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl SettingsStore for RegistryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        use crate::utils::registry::{read_registry_value, RegistryKeyValue};

        let path = crate::constants::SETTINGS_REGISTRY_PATH;
        Ok(match read_registry_value(path, key)? {
            Some(RegistryKeyValue::String(value)) => Some(value.into_owned()),
            Some(RegistryKeyValue::Dword(value)) => Some(value.to_string()),
            Some(other) => {
                tracing::warn!("Unexpected registry value for setting '{}': {}", key, other);
                None
            }
            None => None,
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        use std::borrow::Cow;

        use crate::utils::registry::{create_or_modify_registry_value, RegistryKeyValue};

        create_or_modify_registry_value(
            crate::constants::SETTINGS_REGISTRY_PATH,
            key,
            &RegistryKeyValue::String(Cow::Owned(value.to_string())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::default();
        assert_eq!(store.get("RevertList").unwrap(), None);
        store.set("RevertList", "EnableSysMain").unwrap();
        assert_eq!(store.get("RevertList").unwrap().as_deref(), Some("EnableSysMain"));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let store = FileStore::new(&path);
        store.set("RevertList", "EnableCortana|EnableSysMain").unwrap();
        store.set("Optimizations.SysMain", "0").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("RevertList").unwrap().as_deref(),
            Some("EnableCortana|EnableSysMain")
        );
        assert_eq!(reopened.get("Optimizations.SysMain").unwrap().as_deref(), Some("0"));
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "this is [not toml").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get("RevertList").is_err());
        assert!(store.set("RevertList", "x").is_err());
    }

    #[test]
    fn test_toggle_state_helpers() {
        let store = MemoryStore::default();
        assert_eq!(load_toggle_state(&store, "SysMain").unwrap(), None);

        save_toggle_state(&store, "SysMain", false).unwrap();
        assert_eq!(load_toggle_state(&store, "SysMain").unwrap(), Some(false));
        assert_eq!(store.get("Optimizations.SysMain").unwrap().as_deref(), Some("0"));

        store.set("Optimizations.Cortana", "maybe").unwrap();
        assert_eq!(load_toggle_state(&store, "Cortana").unwrap(), None);
    }
}
