//! Portal Sekolah - Entry Point

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use portal_sekolah::db::DocumentRepository;
use portal_sekolah::roster::{JsonRowsParser, SpreadsheetParser, XlsxParser};
use portal_sekolah::services::{BackupService, Portal, RestoreService};
use portal_sekolah::ui::AdminGate;
use portal_sekolah::utils::path::get_database_path;
use portal_sekolah::{AppSettings, AppState, Database, GradeLevel, SemesterId};

fn main() -> Result<()> {
    let settings = AppSettings::load();

    // Initiera logging
    tracing_subscriber::fmt()
        .with_max_level(settings.tracing_level())
        .with_target(false)
        .init();

    tracing::info!("Startar Portal Sekolah v{}", env!("CARGO_PKG_VERSION"));

    let db_path = settings
        .database_path
        .clone()
        .unwrap_or_else(get_database_path);
    let db = Database::open(&db_path)
        .with_context(|| format!("Kunde inte öppna databasen {:?}", db_path))?;
    db.migrate()?;

    let mut portal = Portal::load(db.documents());

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["import", file] => {
            let bytes = std::fs::read(file).with_context(|| format!("Kunde inte läsa {}", file))?;
            let result = portal.import_roster_bytes(roster_parser(Path::new(file)), &bytes)?;
            for warning in &result.warnings {
                tracing::warn!("{}", warning);
            }
        }
        ["backup"] => {
            let service = BackupService::new(portal.store(), &settings.backup_directory);
            let result = service.create_backup()?;
            tracing::info!("Backup klar: {:?} ({} dokument)", result.path, result.document_count);
        }
        ["restore", file] => {
            let path = PathBuf::from(file);
            let result = RestoreService::new(portal.store()).restore(&path)?;
            tracing::info!("Återställde {} dokument", result.total());
            portal.reload();
        }
        ["admin", password] => {
            let mut state = AppState::new();
            state.open_admin_login();
            if !state.submit_admin_password(&AdminGate::from_settings(&settings), password) {
                bail!("{}", state.admin_error.unwrap_or_default());
            }
            print_exam_banks(&portal);
        }
        [] => print_summary(&portal),
        other => bail!("Okänt kommando: {}", other.join(" ")),
    }

    Ok(())
}

fn print_summary(portal: &Portal<DocumentRepository>) {
    let profile = portal.profile();
    tracing::info!("{} ({})", profile.name, profile.teacher_name);

    for class in portal.classes() {
        let chapters: usize = class.semesters.iter().map(|s| s.chapters.len()).sum();
        tracing::info!(
            "Klass {}: {} kapitel, {} elever",
            class.name,
            chapters,
            portal.students_in_class(&class.id).len()
        );
    }

    tracing::info!("Extramaterial: {}", portal.extras().len());
}

/// JSON-export läses som rader, allt annat som arbetsbok
fn roster_parser(path: &Path) -> &'static dyn SpreadsheetParser {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => &JsonRowsParser,
        _ => &XlsxParser,
    }
}

fn print_exam_banks(portal: &Portal<DocumentRepository>) {
    for grade in GradeLevel::all() {
        for semester in SemesterId::all() {
            let exams: Vec<&str> = portal
                .classes_in_grade(*grade)
                .into_iter()
                .next()
                .and_then(|c| c.semester(*semester))
                .map(|s| s.exams.iter().map(|e| e.title.as_str()).collect())
                .unwrap_or_default();
            tracing::info!("{} {}: {:?}", grade.label(), semester.label(), exams);
        }
    }
}
