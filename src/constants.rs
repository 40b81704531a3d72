// src/constants.rs

pub const UI_SPACING: f32 = 10.0; // Spacing between UI elements
pub const UI_PADDING: f32 = 3.0; // Padding inside UI elements

// Controls the dimensions of each toggle row.
pub const TWEAK_CONTAINER_HEIGHT: f32 = 30.0;
pub const TWEAK_CONTAINER_WIDTH: f32 = 300.0;

pub const COLUMN_WIDTH: f32 = TWEAK_CONTAINER_WIDTH + UI_SPACING;
pub const COLUMN_COUNT: usize = 3;

// Constants for layout and spacing
pub const WINDOW_WIDTH: f32 = COLUMN_WIDTH * COLUMN_COUNT as f32 + UI_SPACING * 4.0;
pub const WINDOW_HEIGHT: f32 = 800.0;

pub const LABEL_FONT_SIZE: f32 = 14.0;

pub const APP_NAME: &str = "TuneX";

/// Settings key holding the pending revert actions.
pub const REVERT_LIST_KEY: &str = "RevertList";
/// Separator between action names in the persisted revert list.
pub const REVERT_LIST_DELIMITER: char = '|';

/// Settings namespace holding the last UI state of each toggle.
pub const TOGGLE_STATE_NAMESPACE: &str = "Optimizations";

/// Settings location used by `RegistryStore`.
pub const SETTINGS_REGISTRY_PATH: &str = "HKEY_CURRENT_USER\\Software\\TuneX";
