// src/lib.rs

pub mod apps;
pub mod backend;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod errors;
pub mod executor;
pub mod ledger;
pub mod orchestrator;
pub mod settings;
pub mod tweaks;
pub mod ui;
pub mod utils;
