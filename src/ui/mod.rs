// src/ui/mod.rs

pub mod switch;

/// Progress of the last change requested for a toggle.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ToggleStatus {
    #[default]
    Idle,
    Busy,
    Failed(String),
}
