use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::path::{get_config_path, get_data_dir};

/// Standardlösenord för lärarpanelen
pub const DEFAULT_ADMIN_PASSWORD: &str = "guru123";

/// Inställningar som läses från `settings.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Delat lösenord för lärarpanelen (jämförs i klartext)
    pub admin_password: String,
    /// Egen sökväg till databasen (None = plattformens datakatalog)
    pub database_path: Option<PathBuf>,
    pub backup_directory: PathBuf,
    /// trace, debug, info, warn eller error
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            database_path: None,
            backup_directory: get_data_dir().join("backups"),
            log_level: "info".to_string(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::load_from(&get_config_path())
    }

    /// Ladda från fil, defaults om filen saknas eller inte går att tolka
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Ogiltig inställningsfil {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level
            .parse()
            .unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = AppSettings::default();
        settings.admin_password = "rahasia".into();
        settings.database_path = Some(PathBuf::from("/tmp/portal.db"));
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: AppSettings = toml::from_str(r#"log_level = "debug""#).unwrap();
        assert_eq!(loaded.admin_password, DEFAULT_ADMIN_PASSWORD);
        assert_eq!(loaded.tracing_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "admin_password = [").unwrap();

        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_unknown_log_level_is_info() {
        let settings = AppSettings {
            log_level: "chatty".into(),
            ..Default::default()
        };
        assert_eq!(settings.tracing_level(), tracing::Level::INFO);
    }
}
