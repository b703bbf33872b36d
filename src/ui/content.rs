//! Klassificering av lagrat innehåll inför rendering
//!
//! Innehåll sanitiseras aldrig. Komplext innehåll isoleras i en sandlådad
//! ram, enkelt innehåll renderas direkt som betrodd markup.

/// Sandbox-attribut för isolerade ramar
pub const SANDBOX_POLICY: &str = "allow-scripts allow-same-origin allow-popups allow-forms";

const COMPLEX_MARKERS: &[&str] = &["<script", "<style", "<iframe", "<html", "<!doctype"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Inline,
    Sandboxed,
}

impl RenderMode {
    pub fn classify(content: &str) -> Self {
        let lower = content.to_ascii_lowercase();
        if COMPLEX_MARKERS.iter().any(|m| lower.contains(m)) {
            Self::Sandboxed
        } else {
            Self::Inline
        }
    }

    /// Sandbox-attributet för läget, None vid inline-rendering
    pub fn sandbox_attribute(&self) -> Option<&'static str> {
        match self {
            Self::Inline => None,
            Self::Sandboxed => Some(SANDBOX_POLICY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_markup_is_inline() {
        assert_eq!(RenderMode::classify("<p>Algoritma adalah <b>langkah</b></p>"), RenderMode::Inline);
        assert_eq!(RenderMode::classify(""), RenderMode::Inline);
        assert_eq!(RenderMode::Inline.sandbox_attribute(), None);
    }

    #[test]
    fn test_complex_markers_are_sandboxed() {
        for content in [
            "<script>alert(1)</script>",
            "<STYLE>p{}</STYLE>",
            "<div><IFrame src=x></iframe></div>",
            "<!DOCTYPE html><html></html>",
        ] {
            assert_eq!(RenderMode::classify(content), RenderMode::Sandboxed, "{}", content);
        }
        assert_eq!(
            RenderMode::Sandboxed.sandbox_attribute(),
            Some("allow-scripts allow-same-origin allow-popups allow-forms")
        );
    }
}
