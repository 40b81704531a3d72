// src/errors.rs

use thiserror::Error;

/// Failure of a single `set_toggle` call.
#[derive(Error, Debug)]
pub enum MutationError {
    #[error("Unknown toggle: {0}")]
    UnknownToggle(String),

    #[error("{key} -> Failed to run {action}: {source:#}")]
    MutationFailure {
        key: String,
        action: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{key} -> Change applied but the revert ledger could not be saved: {source}")]
    LedgerPersistFailure {
        key: String,
        #[source]
        source: LedgerError,
    },
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid action name for the revert ledger: '{0}'")]
    InvalidActionName(String),

    #[error("Failed to load revert ledger: {0:#}")]
    Load(#[source] anyhow::Error),

    #[error("Failed to persist revert ledger after {attempts} attempt(s): {source:#}")]
    Persist {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },
}

/// Failure of one entry of a revert sweep, or of the sweep as a whole.
#[derive(Error, Debug)]
pub enum RevertError {
    #[error("No catalog operation named '{0}'")]
    UnknownAction(String),

    #[error("{action} -> Revert failed: {source:#}")]
    MutationFailure {
        action: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{failed} of {total} revert action(s) failed")]
    Partial { failed: usize, total: usize },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate toggle key: {0}")]
    DuplicateKey(String),

    #[error("Action '{0}' is defined more than once")]
    DuplicateAction(String),

    #[error("Toggle '{0}' uses the same action for both directions")]
    SymmetricAction(String),

    #[error("Toggle '{key}' has an invalid action name: '{action}'")]
    InvalidActionName { key: String, action: String },

    #[error("Alias '{alias}' points to unknown toggle '{target}'")]
    DanglingAlias { alias: String, target: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
