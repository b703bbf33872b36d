//! Backup-service för att exportera dokumentlagret till ZIP

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde_json::{Map, Value};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::db::{Collection, DocumentStore};

const BACKUP_PREFIX: &str = "portal_backup_";

/// Filnamn i arkivet för en samling
pub fn entry_name(collection: Collection) -> String {
    format!("{}.json", collection.as_str())
}

/// Resultat av en backup-operation
#[derive(Debug, Clone)]
pub struct BackupResult {
    /// Sökväg till backup-filen
    pub path: PathBuf,
    /// Storlek i bytes
    pub size: u64,
    /// Antal dokument inkluderade
    pub document_count: usize,
    pub created_at: String,
}

/// Information om en befintlig backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub path: PathBuf,
    pub filename: String,
    pub size: u64,
    /// Datum (extraherat från filnamn)
    pub date: Option<String>,
}

impl BackupInfo {
    /// Formatera storlek för visning
    pub fn size_display(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;

        match self.size {
            b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
            b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
            b => format!("{} B", b),
        }
    }
}

/// Backup-service
pub struct BackupService<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    backup_dir: PathBuf,
}

impl<'a, S: DocumentStore + ?Sized> BackupService<'a, S> {
    pub fn new(store: &'a S, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            backup_dir: backup_dir.into(),
        }
    }

    /// Skapa en backup med en JSON-fil per samling
    pub fn create_backup(&self) -> Result<BackupResult> {
        fs::create_dir_all(&self.backup_dir).context("Kunde inte skapa backup-katalog")?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{}{}.zip", BACKUP_PREFIX, timestamp);
        let backup_path = self.backup_dir.join(&filename);

        let file = File::create(&backup_path).context("Kunde inte skapa backup-fil")?;
        let mut zip = ZipWriter::new(file);

        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .compression_level(Some(6));

        let mut document_count = 0;

        for collection in Collection::ALL {
            let docs = self
                .store
                .get_all(*collection)
                .with_context(|| format!("Kunde inte läsa {}", collection))?;
            document_count += docs.len();

            let map: Map<String, Value> = docs.into_iter().collect();
            let body = serde_json::to_vec_pretty(&Value::Object(map))?;

            zip.start_file(entry_name(*collection), options)?;
            zip.write_all(&body)?;
        }

        zip.finish().context("Kunde inte avsluta ZIP-fil")?;

        let metadata = fs::metadata(&backup_path)?;
        tracing::info!("Backup skapad: {:?} ({} dokument)", backup_path, document_count);

        Ok(BackupResult {
            path: backup_path,
            size: metadata.len(),
            document_count,
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    /// Lista befintliga backuper, nyaste först
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)? {
            let path = entry?.path();

            if path.extension().map(|e| e == "zip").unwrap_or(false) {
                let filename = path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();

                let metadata = fs::metadata(&path)?;
                let date = extract_date_from_filename(&filename);

                backups.push(BackupInfo {
                    path,
                    filename,
                    size: metadata.len(),
                    date,
                });
            }
        }

        backups.sort_by(|a, b| b.filename.cmp(&a.filename));

        Ok(backups)
    }

    /// Ta bort en backup
    pub fn delete_backup(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).context("Kunde inte ta bort backup-fil")?;
        Ok(())
    }
}

fn extract_date_from_filename(filename: &str) -> Option<String> {
    // Format: portal_backup_YYYYMMDD_HHMMSS.zip
    let date_part = filename.strip_prefix(BACKUP_PREFIX)?.strip_suffix(".zip")?;
    let parsed = chrono::NaiveDateTime::parse_from_str(date_part, "%Y%m%d_%H%M%S").ok()?;
    Some(parsed.format("%Y-%m-%d %H:%M:%S").to_string())
}
