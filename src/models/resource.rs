use serde::{Deserialize, Serialize};

/// Innehållet i en resurs: antingen en länk eller inbäddad HTML.
///
/// Serialiseras med diskriminatorn `type` bredvid exakt ett av fälten
/// `url` eller `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResourceBody {
    Link { url: String },
    Html { content: String },
}

impl ResourceBody {
    pub fn link(url: impl Into<String>) -> Self {
        Self::Link { url: url.into() }
    }

    pub fn html(content: impl Into<String>) -> Self {
        Self::Html {
            content: content.into(),
        }
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Link { .. } => "link",
            Self::Html { .. } => "html",
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Link { url } => Some(url),
            Self::Html { .. } => None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Html { content } => Some(content),
            Self::Link { .. } => None,
        }
    }
}

/// Länkad eller inbäddad resurs (video, quiz, prov, schema, betygsöversikt)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub body: ResourceBody,
}

impl ResourceItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: ResourceBody) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body,
        }
    }

    pub fn link(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(id, title, ResourceBody::link(url))
    }

    pub fn html(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(id, title, ResourceBody::html(content))
    }
}

/// Läsavsnitt i ett kapitel, samma form som [`ResourceItem`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub body: ResourceBody,
}

impl ContentSection {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: ResourceBody) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_serializes_with_url_only() {
        let item = ResourceItem::link("v1", "Video 1", "https://example.org/v1");
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(
            value,
            json!({"id": "v1", "title": "Video 1", "type": "link", "url": "https://example.org/v1"})
        );
        assert!(value.get("content").is_none());
    }

    #[test]
    fn test_html_serializes_with_content_only() {
        let section = ContentSection::new("s1", "Pengantar", ResourceBody::html("<p>Halo</p>"));
        let value = serde_json::to_value(&section).unwrap();

        assert_eq!(value["type"], "html");
        assert_eq!(value["content"], "<p>Halo</p>");
        assert!(value.get("url").is_none());
    }

    #[test]
    fn test_deserialize_stored_document() {
        let item: ResourceItem = serde_json::from_value(json!({
            "id": "q1",
            "title": "Kuis",
            "type": "html",
            "content": "<iframe src=\"x\"></iframe>"
        }))
        .unwrap();

        assert_eq!(item.body.type_tag(), "html");
        assert_eq!(item.body.url(), None);
        assert!(item.body.content().unwrap().contains("iframe"));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: Result<ResourceItem, _> = serde_json::from_value(json!({
            "id": "x",
            "title": "x",
            "type": "pdf",
            "url": "a"
        }));
        assert!(result.is_err());
    }
}
