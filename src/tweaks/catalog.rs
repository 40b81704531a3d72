// src/tweaks/catalog.rs

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::{definitions, Action, ToggleEntry};
use crate::{constants::REVERT_LIST_DELIMITER, errors::CatalogError};

/// Extra UI keys that map onto an existing toggle.
const ALIASES: &[(&str, &str)] = &[("LocationAccess", "LocationFeatures")];

/// Action names written to the revert ledger by earlier versions.
const LEGACY_ACTION_NAMES: &[(&str, &str)] = &[
    ("EnableSMB(\"1\")", "EnableSMBv1"),
    ("EnableSMB(\"2\")", "EnableSMBv2"),
    ("DisableSMB(\"1\")", "DisableSMBv1"),
    ("DisableSMB(\"2\")", "DisableSMBv2"),
];

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| {
    let catalog = Catalog::from_entries(definitions::all())
        .and_then(|catalog| catalog.with_aliases(ALIASES))
        .unwrap_or_else(|e| panic!("Built-in toggle catalog is inconsistent: {}", e));
    tracing::debug!("Loaded {} toggles.", catalog.len());
    Arc::new(catalog)
});

/// Lookup tables over a fixed set of toggle entries.
#[derive(Debug)]
pub struct Catalog {
    entries: IndexMap<&'static str, &'static ToggleEntry>,
    actions: IndexMap<&'static str, (&'static ToggleEntry, &'static Action)>,
    aliases: IndexMap<&'static str, &'static str>,
}

impl Catalog {
    /// The catalog shipped with the application.
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    /// Builds a catalog, rejecting tables the dispatcher or ledger could not work with.
    pub fn from_entries<I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = &'static ToggleEntry>,
    {
        let mut catalog = Catalog {
            entries: IndexMap::new(),
            actions: IndexMap::new(),
            aliases: IndexMap::new(),
        };

        for entry in entries {
            if catalog.entries.contains_key(entry.key) {
                return Err(CatalogError::DuplicateKey(entry.key.to_string()));
            }
            if entry.on.name == entry.off.name {
                return Err(CatalogError::SymmetricAction(entry.key.to_string()));
            }
            for action in [&entry.on, &entry.off] {
                if action.name.is_empty() || action.name.contains(REVERT_LIST_DELIMITER) {
                    return Err(CatalogError::InvalidActionName {
                        key: entry.key.to_string(),
                        action: action.name.to_string(),
                    });
                }
                if catalog.actions.insert(action.name, (entry, action)).is_some() {
                    return Err(CatalogError::DuplicateAction(action.name.to_string()));
                }
            }
            catalog.entries.insert(entry.key, entry);
        }

        Ok(catalog)
    }

    /// Registers alternative keys for existing toggles.
    pub fn with_aliases(mut self, aliases: &[(&'static str, &'static str)]) -> Result<Self, CatalogError> {
        for &(alias, target) in aliases {
            if self.entries.contains_key(alias) || self.aliases.contains_key(alias) {
                return Err(CatalogError::DuplicateKey(alias.to_string()));
            }
            if !self.entries.contains_key(target) {
                return Err(CatalogError::DanglingAlias {
                    alias: alias.to_string(),
                    target: target.to_string(),
                });
            }
            self.aliases.insert(alias, target);
        }
        Ok(self)
    }

    /// Finds a toggle by its key or one of its aliases.
    pub fn lookup(&self, key: &str) -> Option<&'static ToggleEntry> {
        let key = self.aliases.get(key).copied().unwrap_or(key);
        self.entries.get(key).copied()
    }

    /// Resolves a ledger entry to the toggle owning it and the action itself.
    pub fn action(&self, name: &str) -> Option<(&'static ToggleEntry, &'static Action)> {
        let name = self.canonical_action_name(name).unwrap_or(name);
        self.actions.get(name).copied()
    }

    /// Current spelling of a legacy action name. `None` if `name` is not a legacy name.
    pub fn canonical_action_name(&self, name: &str) -> Option<&'static str> {
        LEGACY_ACTION_NAMES
            .iter()
            .find(|(legacy, _)| *legacy == name)
            .map(|(_, current)| *current)
    }

    /// Legacy spellings that resolve to `name`.
    pub fn legacy_names<'a>(&self, name: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        LEGACY_ACTION_NAMES
            .iter()
            .filter(move |(_, current)| *current == name)
            .map(|(legacy, _)| *legacy)
    }

    /// Entries in table order.
    pub fn entries(&self) -> impl Iterator<Item = &'static ToggleEntry> + '_ {
        self.entries.values().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tweaks::TweakCategory;

    static FIRST: ToggleEntry = ToggleEntry {
        key: "First",
        name: "First",
        category: TweakCategory::System,
        on: Action {
            name: "EnableFirst",
            steps: &[],
        },
        off: Action {
            name: "DisableFirst",
            steps: &[],
        },
        default_state: true,
        confirmation: None,
    };

    static FIRST_AGAIN: ToggleEntry = ToggleEntry {
        key: "First",
        name: "First again",
        category: TweakCategory::System,
        on: Action {
            name: "EnableFirstAgain",
            steps: &[],
        },
        off: Action {
            name: "DisableFirstAgain",
            steps: &[],
        },
        default_state: true,
        confirmation: None,
    };

    static SHARES_ACTION: ToggleEntry = ToggleEntry {
        key: "Second",
        name: "Second",
        category: TweakCategory::System,
        on: Action {
            name: "EnableFirst",
            steps: &[],
        },
        off: Action {
            name: "DisableSecond",
            steps: &[],
        },
        default_state: true,
        confirmation: None,
    };

    static SYMMETRIC: ToggleEntry = ToggleEntry {
        key: "Symmetric",
        name: "Symmetric",
        category: TweakCategory::System,
        on: Action {
            name: "ToggleSymmetric",
            steps: &[],
        },
        off: Action {
            name: "ToggleSymmetric",
            steps: &[],
        },
        default_state: false,
        confirmation: None,
    };

    static PIPE_NAME: ToggleEntry = ToggleEntry {
        key: "Pipe",
        name: "Pipe",
        category: TweakCategory::System,
        on: Action {
            name: "Enable|Pipe",
            steps: &[],
        },
        off: Action {
            name: "DisablePipe",
            steps: &[],
        },
        default_state: false,
        confirmation: None,
    };

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());

        for entry in catalog.entries() {
            let found = catalog.lookup(entry.key).expect("every key resolves");
            assert_eq!(found.key, entry.key);
            assert_ne!(entry.on.name, entry.off.name, "{} uses one action twice", entry.key);

            for action in [&entry.on, &entry.off] {
                let (owner, resolved) = catalog.action(action.name).expect("every action resolves");
                assert_eq!(owner.key, entry.key);
                assert_eq!(resolved.name, action.name);
            }
        }
    }

    #[test]
    fn test_smb_versions_are_distinct_entries() {
        let catalog = Catalog::builtin();
        let v1 = catalog.lookup("SMBv1").unwrap();
        let v2 = catalog.lookup("SMBv2").unwrap();
        assert_eq!(v1.on.name, "EnableSMBv1");
        assert_eq!(v2.on.name, "EnableSMBv2");
        assert_ne!(v1.off.name, v2.off.name);
    }

    #[test]
    fn test_legacy_action_names_resolve() {
        let catalog = Catalog::builtin();
        let (entry, action) = catalog.action("EnableSMB(\"1\")").unwrap();
        assert_eq!(entry.key, "SMBv1");
        assert_eq!(action.name, "EnableSMBv1");
        let (entry, _) = catalog.action("EnableSMB(\"2\")").unwrap();
        assert_eq!(entry.key, "SMBv2");
    }

    #[test]
    fn test_legacy_spellings() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.canonical_action_name("DisableSMB(\"1\")"),
            Some("DisableSMBv1")
        );
        assert_eq!(catalog.canonical_action_name("EnableSMBv1"), None);
        assert_eq!(
            catalog.legacy_names("EnableSMBv2").collect::<Vec<_>>(),
            vec!["EnableSMB(\"2\")"]
        );
        assert_eq!(catalog.legacy_names("EnableSysMain").count(), 0);
    }

    #[test]
    fn test_location_alias() {
        let catalog = Catalog::builtin();
        let alias = catalog.lookup("LocationAccess").unwrap();
        let target = catalog.lookup("LocationFeatures").unwrap();
        assert!(std::ptr::eq(alias, target));
        assert_eq!(alias.revert_action().name, "EnableLocationFeatures");
    }

    #[test]
    fn test_sysmain_polarity() {
        let entry = Catalog::builtin().lookup("SysMain").unwrap();
        assert!(entry.default_state);
        assert_eq!(entry.revert_action().name, "EnableSysMain");
        assert_eq!(entry.off.name, "DisableSysMain");
    }

    #[test]
    fn test_unknown_lookups() {
        let catalog = Catalog::builtin();
        assert!(catalog.lookup("NoSuchToggle").is_none());
        assert!(catalog.action("EnableNothing").is_none());
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let err = Catalog::from_entries([&FIRST, &FIRST_AGAIN]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateKey("First".to_string()));
    }

    #[test]
    fn test_rejects_shared_action() {
        let err = Catalog::from_entries([&FIRST, &SHARES_ACTION]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateAction("EnableFirst".to_string()));
    }

    #[test]
    fn test_rejects_symmetric_action() {
        let err = Catalog::from_entries([&SYMMETRIC]).unwrap_err();
        assert_eq!(err, CatalogError::SymmetricAction("Symmetric".to_string()));
    }

    #[test]
    fn test_rejects_delimiter_in_action_name() {
        let err = Catalog::from_entries([&PIPE_NAME]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidActionName {
                key: "Pipe".to_string(),
                action: "Enable|Pipe".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_dangling_alias() {
        let err = Catalog::from_entries([&FIRST])
            .unwrap()
            .with_aliases(&[("Other", "Missing")])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DanglingAlias { .. }));
    }
}
