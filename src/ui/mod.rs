//! Navigationsskal: vyer, övergångar och adminspärr
//!
//! Skalet läser portalens tillstånd och skickar ändringar till `Portal`.
//! Ingen rendering sker här.

pub mod content;
pub mod state;

pub use content::{RenderMode, SANDBOX_POLICY};
pub use state::{AdminGate, AppState, StatusMessage, StatusType, View};
