use serde::{Deserialize, Serialize};
use std::fmt;

use super::resource::{ContentSection, ResourceItem};

/// Årskurs. Klass-id:n börjar med årskursens siffra ("7A", "7B", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
}

impl GradeLevel {
    pub fn all() -> &'static [GradeLevel] {
        &[Self::Seven, Self::Eight, Self::Nine]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
        }
    }

    /// Romersk beteckning som används i elevlistor ("VII", "VIII", "IX")
    pub fn roman(&self) -> &'static str {
        match self {
            Self::Seven => "VII",
            Self::Eight => "VIII",
            Self::Nine => "IX",
        }
    }

    pub fn from_roman(token: &str) -> Option<Self> {
        match token {
            "VII" => Some(Self::Seven),
            "VIII" => Some(Self::Eight),
            "IX" => Some(Self::Nine),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        format!("Kelas {}", self.as_str())
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Termin. Mängden är fast: varje klass har alltid båda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemesterId {
    #[default]
    Ganjil,
    Genap,
}

impl SemesterId {
    pub fn all() -> &'static [SemesterId] {
        &[Self::Ganjil, Self::Genap]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ganjil => "ganjil",
            Self::Genap => "genap",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ganjil => "Semester Ganjil",
            Self::Genap => "Semester Genap",
        }
    }
}

impl fmt::Display for SemesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Sätts när kapitlet skapas och räknas aldrig om
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub contents: Vec<ContentSection>,
    #[serde(default)]
    pub videos: Vec<ResourceItem>,
    #[serde(default)]
    pub quizzes: Vec<ResourceItem>,
}

impl Chapter {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            progress: 0,
            contents: Vec::new(),
            videos: Vec::new(),
            quizzes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: SemesterId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grades: Option<ResourceItem>,
    /// Provbanken ("bank soal")
    #[serde(default)]
    pub exams: Vec<ResourceItem>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Semester {
    pub fn empty(id: SemesterId) -> Self {
        Self {
            id,
            name: id.label().to_string(),
            grades: None,
            exams: Vec::new(),
            chapters: Vec::new(),
        }
    }

    pub fn chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == chapter_id)
    }

    /// Kapitelnummer (1-baserat) enligt position i listan
    pub fn chapter_number(&self, chapter_id: &str) -> Option<usize> {
        self.chapters
            .iter()
            .position(|c| c.id == chapter_id)
            .map(|i| i + 1)
    }
}

/// En klass. Hela dokumentet är lagringsenheten: varje ändring i ett
/// kapitel eller en resurs skriver om hela klassen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassData {
    pub id: String,
    pub name: String,
    pub grade_level: GradeLevel,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ResourceItem>,
    #[serde(default)]
    pub semesters: Vec<Semester>,
}

impl ClassData {
    pub fn new(id: impl Into<String>, name: impl Into<String>, grade_level: GradeLevel, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            grade_level,
            color: color.into(),
            schedule: None,
            semesters: SemesterId::all().iter().map(|s| Semester::empty(*s)).collect(),
        }
    }

    pub fn semester(&self, id: SemesterId) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.id == id)
    }

    /// Återställ termin-paret ganjil/genap om något saknas i ett lagrat dokument.
    /// Returnerar true om dokumentet ändrades.
    pub fn ensure_semesters(&mut self) -> bool {
        let mut changed = false;
        for id in SemesterId::all() {
            if self.semester(*id).is_none() {
                self.semesters.push(Semester::empty(*id));
                changed = true;
            }
        }
        changed
    }
}
