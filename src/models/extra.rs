use serde::{Deserialize, Serialize};

use super::resource::ResourceBody;

/// Kategori för extramaterial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraCategory {
    Game,
    Video,
    Artikel,
    Ebook,
    Simulasi,
    Tools,
    Lainnya,
}

impl ExtraCategory {
    pub const ALL: &'static [Self] = &[
        Self::Game,
        Self::Video,
        Self::Artikel,
        Self::Ebook,
        Self::Simulasi,
        Self::Tools,
        Self::Lainnya,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Game => "Game Edukasi",
            Self::Video => "Video Pembelajaran",
            Self::Artikel => "Artikel",
            Self::Ebook => "E-Book",
            Self::Simulasi => "Simulasi",
            Self::Tools => "Tools",
            Self::Lainnya => "Lainnya",
        }
    }
}

/// Extramaterial, fristående från klasstrukturen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraContent {
    pub id: String,
    pub title: String,
    pub category: ExtraCategory,
    #[serde(flatten)]
    pub body: ResourceBody,
}

impl ExtraContent {
    pub fn new(id: impl Into<String>, title: impl Into<String>, category: ExtraCategory, body: ResourceBody) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category,
            body,
        }
    }
}
