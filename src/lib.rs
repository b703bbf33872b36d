//! Portal Sekolah - lärportal för skolklasser
//!
//! Klassträd med terminer och kapitel, elevregister, extramaterial och
//! skolprofil, lagrat som JSON-dokument i SQLite.

pub mod db;
pub mod engine;
pub mod models;
pub mod roster;
pub mod services;
pub mod ui;
pub mod utils;

// Re-exports
pub use db::Database;
pub use models::*;
pub use services::{Portal, PortalState, SyncOutcome};
pub use ui::{AppState, View};
