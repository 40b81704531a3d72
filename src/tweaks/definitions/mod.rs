// src/tweaks/definitions/mod.rs

//! The built-in toggle table, one module per UI column group.

mod interface;
mod performance;
mod privacy;
mod services;
mod system;
mod third_party;

use super::ToggleEntry;

/// Every built-in toggle in display order.
pub fn all() -> impl Iterator<Item = &'static ToggleEntry> {
    system::ENTRIES
        .iter()
        .chain(performance::ENTRIES)
        .chain(services::ENTRIES)
        .chain(privacy::ENTRIES)
        .chain(interface::ENTRIES)
        .chain(third_party::ENTRIES)
}
