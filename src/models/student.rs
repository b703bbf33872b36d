use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    /// Laki-laki
    #[serde(rename = "L")]
    Male,
    /// Perempuan
    #[default]
    #[serde(rename = "P")]
    Female,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Male => "L",
            Self::Female => "P",
        }
    }

    /// Endast exakt "L" ger pojke, allt annat flicka
    pub fn from_code(code: &str) -> Self {
        if code == "L" {
            Self::Male
        } else {
            Self::Female
        }
    }
}

/// Elev. `id` är lagringsnyckeln och normalt samma som NIS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub nis: String,
    #[serde(default)]
    pub gender: Gender,
    pub class_id: String,
}

impl Student {
    pub fn new(nis: impl Into<String>, name: impl Into<String>, gender: Gender, class_id: impl Into<String>) -> Self {
        let nis = nis.into();
        Self {
            id: nis.clone(),
            name: name.into(),
            nis,
            gender,
            class_id: class_id.into(),
        }
    }

    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.name.trim().is_empty() {
            return Err(StudentValidationError::MissingName);
        }
        if self.nis.trim().is_empty() {
            return Err(StudentValidationError::MissingNis);
        }
        if self.class_id.trim().is_empty() {
            return Err(StudentValidationError::MissingClass);
        }
        Ok(())
    }

    /// Matchar inloggningsnamn (trimmat, skiftlägesokänsligt)
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StudentValidationError {
    #[error("Namn krävs")]
    MissingName,
    #[error("NIS krävs")]
    MissingNis,
    #[error("Klass krävs")]
    MissingClass,
}
