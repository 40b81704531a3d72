// src/tweaks/mod.rs

pub mod catalog;
pub mod definitions;
pub mod method;
pub mod step;

use strum_macros::{Display, EnumIter};

use self::step::Step;

/// Column a toggle is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum TweakCategory {
    System,
    Performance,
    Services,
    Privacy,
    Interface,
    #[strum(serialize = "Third Party")]
    ThirdParty,
}

/// One directional change to system state. The name doubles as the revert ledger entry.
#[derive(Debug)]
pub struct Action {
    pub name: &'static str,
    pub steps: &'static [Step],
}

/// A UI toggle and the pair of actions behind it.
#[derive(Debug)]
pub struct ToggleEntry {
    /// Unique key of the UI control, also used for the stored UI state.
    pub key: &'static str,
    /// Label shown next to the switch.
    pub name: &'static str,
    pub category: TweakCategory,
    /// Run when the switch is turned on.
    pub on: Action,
    /// Run when the switch is turned off.
    pub off: Action,
    /// State of the toggle on a stock Windows install.
    pub default_state: bool,
    /// Question the UI asks before moving the toggle away from its default.
    pub confirmation: Option<&'static str>,
}

impl ToggleEntry {
    /// The action that brings the system back to its default for this toggle.
    pub fn revert_action(&self) -> &Action {
        self.action_for(self.default_state)
    }

    pub fn action_for(&self, desired_on: bool) -> &Action {
        if desired_on {
            &self.on
        } else {
            &self.off
        }
    }

    /// Whether moving to `desired_on` leaves a pending revert behind.
    pub fn leaves_default(&self, desired_on: bool) -> bool {
        desired_on != self.default_state
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    static SAMPLE: ToggleEntry = ToggleEntry {
        key: "Sample",
        name: "Sample",
        category: TweakCategory::Services,
        on: Action {
            name: "EnableSample",
            steps: &[],
        },
        off: Action {
            name: "DisableSample",
            steps: &[],
        },
        default_state: true,
        confirmation: None,
    };

    #[test]
    fn test_revert_action_follows_default_state() {
        assert_eq!(SAMPLE.revert_action().name, "EnableSample");
        assert_eq!(SAMPLE.action_for(false).name, "DisableSample");
        assert!(SAMPLE.leaves_default(false));
        assert!(!SAMPLE.leaves_default(true));
    }

    #[test]
    fn test_category_labels() {
        let labels: Vec<String> = TweakCategory::iter().map(|c| c.to_string()).collect();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels.last().map(String::as_str), Some("Third Party"));
    }
}
