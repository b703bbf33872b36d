//! Tjänster för portalen
//!
//! Innehåller affärslogik som inte hör hemma i UI eller databas.

pub mod backup;
pub mod portal;
pub mod restore;
pub mod sync;

pub use backup::{BackupInfo, BackupResult, BackupService};
pub use portal::{Portal, PortalState};
pub use restore::{RestorePreview, RestoreResult, RestoreService};
pub use sync::{SyncOutcome, Synchronizer};
