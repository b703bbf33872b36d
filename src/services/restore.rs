//! Restore-service för att återställa dokumentlagret från backup

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use zip::ZipArchive;

use crate::db::{Collection, DocumentStore};

use super::backup::entry_name;

/// Resultat av en restore-operation
#[derive(Debug, Clone, Default)]
pub struct RestoreResult {
    /// Antal dokument återställda per samling
    pub restored: Vec<(Collection, usize)>,
}

impl RestoreResult {
    pub fn total(&self) -> usize {
        self.restored.iter().map(|(_, n)| n).sum()
    }
}

/// Förhandsgranskning av restore
#[derive(Debug, Clone, Default)]
pub struct RestorePreview {
    /// Antal dokument per samling i arkivet
    pub collections: Vec<(Collection, usize)>,
}

/// Restore-service
pub struct RestoreService<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> RestoreService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Förhandsgranska en backup
    pub fn preview(&self, backup_path: &Path) -> Result<RestorePreview> {
        let docs = read_archive(backup_path)?;
        Ok(RestorePreview {
            collections: docs.iter().map(|(c, d)| (*c, d.len())).collect(),
        })
    }

    /// Återställ alla samlingar i arkivet. Varje samling skrivs som en batch;
    /// dokument som inte finns i arkivet lämnas orörda.
    pub fn restore(&self, backup_path: &Path) -> Result<RestoreResult> {
        let docs = read_archive(backup_path)?;
        let mut result = RestoreResult::default();

        for (collection, documents) in docs {
            if !documents.is_empty() {
                self.store
                    .put_batch(collection, &documents)
                    .with_context(|| format!("Kunde inte återställa {}", collection))?;
            }
            tracing::info!("Återställde {} dokument i {}", documents.len(), collection);
            result.restored.push((collection, documents.len()));
        }

        Ok(result)
    }
}

type ArchiveDocuments = Vec<(Collection, Vec<(String, Value)>)>;

fn read_archive(backup_path: &Path) -> Result<ArchiveDocuments> {
    let file = File::open(backup_path).context("Kunde inte öppna backup-fil")?;
    let mut archive = ZipArchive::new(file).context("Kunde inte läsa ZIP-arkiv")?;

    let mut out = Vec::new();

    for collection in Collection::ALL {
        let mut entry = match archive.by_name(&entry_name(*collection)) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => continue,
            Err(e) => return Err(e.into()),
        };

        let mut body = String::new();
        entry.read_to_string(&mut body)?;

        let Value::Object(map) = serde_json::from_str(&body)
            .with_context(|| format!("Ogiltig JSON i {}", entry_name(*collection)))?
        else {
            bail!("{} är inte ett JSON-objekt", entry_name(*collection));
        };

        out.push((*collection, map.into_iter().collect()));
    }

    if out.is_empty() {
        bail!("Arkivet innehåller inga samlingar");
    }

    Ok(out)
}
