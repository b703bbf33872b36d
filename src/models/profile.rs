use serde::{Deserialize, Serialize};

/// Skolprofil (singleton, lagras som `settings/profile`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolProfile {
    pub name: String,
    pub description: String,
    pub address: String,
    pub email: String,
    pub teacher_name: String,
    pub phone: String,
    pub greeting: String,
    /// Roterande citat på startsidan, högst [`SchoolProfile::MAX_QUOTES`]
    #[serde(default)]
    pub quotes: Vec<String>,
}

impl SchoolProfile {
    pub const MAX_QUOTES: usize = 5;

    /// Lagringsnyckel i `settings`-samlingen
    pub const DOCUMENT_ID: &'static str = "profile";
}

impl Default for SchoolProfile {
    fn default() -> Self {
        Self {
            name: "SMP Negeri".to_string(),
            description: "Portal pembelajaran kelas VII, VIII dan IX".to_string(),
            address: String::new(),
            email: String::new(),
            teacher_name: "Guru Mata Pelajaran".to_string(),
            phone: String::new(),
            greeting: "Selamat datang di portal belajar!".to_string(),
            quotes: vec![
                "Belajar hari ini, memimpin hari esok.".to_string(),
                "Tidak ada kata terlambat untuk belajar.".to_string(),
                "Ilmu adalah cahaya.".to_string(),
            ],
        }
    }
}

/// Formulärdata för profilen. `None` lämnar fältet orört,
/// `Some` ersätter hela fältet (även hela citatlistan).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub teacher_name: Option<String>,
    pub phone: Option<String>,
    pub greeting: Option<String>,
    pub quotes: Option<Vec<String>>,
}

impl ProfilePatch {
    pub fn quotes(quotes: Vec<String>) -> Self {
        Self {
            quotes: Some(quotes),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if let Some(quotes) = &self.quotes {
            if quotes.len() > SchoolProfile::MAX_QUOTES {
                return Err(ProfileValidationError::TooManyQuotes(quotes.len()));
            }
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ProfileValidationError::EmptyName);
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("Högst {max} citat tillåts, fick {0}", max = SchoolProfile::MAX_QUOTES)]
    TooManyQuotes(usize),
    #[error("Skolans namn får inte vara tomt")]
    EmptyName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_deserializes_partial_form() {
        let patch: ProfilePatch = serde_json::from_str(r#"{"teacherName": "Bu Rina"}"#).unwrap();
        assert_eq!(patch.teacher_name.as_deref(), Some("Bu Rina"));
        assert!(patch.quotes.is_none());
    }

    #[test]
    fn test_patch_validation() {
        let ok = ProfilePatch::quotes(vec!["a".into(); 5]);
        assert!(ok.validate().is_ok());

        let too_many = ProfilePatch::quotes(vec!["a".into(); 6]);
        assert!(matches!(too_many.validate(), Err(ProfileValidationError::TooManyQuotes(6))));
    }
}
