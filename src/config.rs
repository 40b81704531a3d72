// src/config.rs

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::{errors::ConfigError, executor::SweepPolicy};

/// Where the revert ledger and per-toggle UI state are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingsBackend {
    Registry,
    File,
}

impl Default for SettingsBackend {
    fn default() -> Self {
        if cfg!(windows) {
            SettingsBackend::Registry
        } else {
            SettingsBackend::File
        }
    }
}

/// Application configuration read from `<config_dir>/tunex/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Upper bound on how long a single external command is waited for.
    pub command_timeout_secs: u64,
    /// Log every step instead of changing the system.
    pub dry_run: bool,
    /// Maximum tracing level in debug builds.
    pub log_level: String,
    pub settings_backend: SettingsBackend,
    /// How many times a revert ledger write is attempted before giving up.
    pub ledger_persist_attempts: u32,
    /// What happens to the revert ledger after "Revert all changes".
    pub after_revert: SweepPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: 120,
            dry_run: false,
            log_level: "debug".to_string(),
            settings_backend: SettingsBackend::default(),
            ledger_persist_attempts: 3,
            after_revert: SweepPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("tunex");
            path.push("config.toml");
            path
        })
    }

    /// Loads the config from its default location. Defaults are used when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("No config directory on this system, using default settings.");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} not found, using default settings.", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// The configured log level, DEBUG if it cannot be parsed.
    pub fn tracing_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::DEBUG)
    }

    /// Attempts per ledger write, never less than one.
    pub fn persist_attempts(&self) -> u32 {
        self.ledger_persist_attempts.max(1)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.command_timeout(), Duration::from_secs(120));
        assert_eq!(config.after_revert, SweepPolicy::RetainFailed);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = write_config("dry_run = true\nafter_revert = \"clear\"\n");
        let config = AppConfig::load_from(file.path()).unwrap();
        assert!(config.dry_run);
        assert_eq!(config.after_revert, SweepPolicy::Clear);
        assert_eq!(config.ledger_persist_attempts, 3);
    }

    #[test]
    fn test_settings_backend_names() {
        let file = write_config("settings_backend = \"file\"\n");
        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.settings_backend, SettingsBackend::File);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let file = write_config("command_timeout_secs = \"soon\"\n");
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_log_level_fallback() {
        let mut config = AppConfig {
            log_level: "warn".to_string(),
            ..Default::default()
        };
        assert_eq!(config.tracing_level(), Level::WARN);
        config.log_level = "chatty".to_string();
        assert_eq!(config.tracing_level(), Level::DEBUG);
    }

    #[test]
    fn test_persist_attempts_at_least_one() {
        let config = AppConfig {
            ledger_persist_attempts: 0,
            ..Default::default()
        };
        assert_eq!(config.persist_attempts(), 1);
    }
}
