//! Synkronisering av lokala ändringar till dokumentlagret
//!
//! Lokalt tillstånd är redan uppdaterat när synkroniseringen körs.
//! Fel loggas och sväljs: ingen retry och ingen rollback.

use serde::Serialize;
use serde_json::Value;

use crate::db::{Collection, DocumentStore};
use crate::engine::Keyed;

/// Utfall av en skrivning mot lagret
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Antal dokument som skrevs
    Written(usize),
    Removed,
    /// Inget att skriva (ändringen träffade ingenting)
    Skipped,
    /// Skrivningen misslyckades; lokalt tillstånd gäller ändå
    Failed(String),
}

impl SyncOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

pub struct Synchronizer<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> Synchronizer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Skriv ett helt dokument
    pub fn sync_one<T: Serialize>(&self, collection: Collection, id: &str, document: &T) -> SyncOutcome {
        let result = serde_json::to_value(document)
            .map_err(anyhow::Error::from)
            .and_then(|value| self.store.put(collection, id, &value));

        match result {
            Ok(()) => {
                tracing::debug!("Sparade {}/{}", collection, id);
                SyncOutcome::Written(1)
            }
            Err(e) => Self::failed(format!("Kunde inte spara {}/{}: {:#}", collection, id, e)),
        }
    }

    /// Skriv flera dokument i samma samling som en atomisk batch
    pub fn sync_many<'d, T, I>(&self, collection: Collection, documents: I) -> SyncOutcome
    where
        T: Serialize + Keyed + 'd,
        I: IntoIterator<Item = &'d T>,
    {
        let batch: Result<Vec<(String, Value)>, serde_json::Error> = documents
            .into_iter()
            .map(|doc| Ok((doc.key().to_string(), serde_json::to_value(doc)?)))
            .collect();

        let batch = match batch {
            Ok(batch) if batch.is_empty() => return SyncOutcome::Skipped,
            Ok(batch) => batch,
            Err(e) => return Self::failed(format!("Kunde inte serialisera batch för {}: {}", collection, e)),
        };

        match self.store.put_batch(collection, &batch) {
            Ok(()) => {
                tracing::info!("Sparade {} dokument i {}", batch.len(), collection);
                SyncOutcome::Written(batch.len())
            }
            Err(e) => Self::failed(format!(
                "Batch till {} misslyckades ({} dokument): {:#}",
                collection,
                batch.len(),
                e
            )),
        }
    }

    /// Ta bort ett dokument
    pub fn remove(&self, collection: Collection, id: &str) -> SyncOutcome {
        match self.store.delete(collection, id) {
            Ok(()) => {
                tracing::debug!("Tog bort {}/{}", collection, id);
                SyncOutcome::Removed
            }
            Err(e) => Self::failed(format!("Kunde inte ta bort {}/{}: {:#}", collection, id, e)),
        }
    }

    fn failed(message: String) -> SyncOutcome {
        tracing::error!("{}", message);
        SyncOutcome::Failed(message)
    }
}
