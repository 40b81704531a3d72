// src/utils.rs

pub mod command;
pub mod registry;
#[cfg(windows)]
pub mod services;
#[cfg(windows)]
pub mod windows;
