//! Screenshot categories.
//!
//! A closed set of labels. Display titles are kept in a lookup separate
//! from the variants so the decision logic stays free of presentation text.

use serde::{Deserialize, Serialize};

/// Category assigned to a screenshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScreenshotCategory {
    /// Chat / messaging conversation
    Chat,
    /// Meme or comic
    Meme,
    /// App or website interface
    Ui,
    /// Text-heavy document
    TextDocument,
    /// Camera photo
    Photo,
    /// No rule matched
    Unknown,
}

/// Display titles, in enumeration order
const TITLES: &[(ScreenshotCategory, &str)] = &[
    (ScreenshotCategory::Chat, "Chat / Messaging"),
    (ScreenshotCategory::Meme, "Meme"),
    (ScreenshotCategory::Ui, "App/Website UI"),
    (ScreenshotCategory::TextDocument, "Textdokument"),
    (ScreenshotCategory::Photo, "Foto"),
    (ScreenshotCategory::Unknown, "Unklar"),
];

impl ScreenshotCategory {
    /// All categories in iteration order
    pub const ALL: [ScreenshotCategory; 6] = [
        ScreenshotCategory::Chat,
        ScreenshotCategory::Meme,
        ScreenshotCategory::Ui,
        ScreenshotCategory::TextDocument,
        ScreenshotCategory::Photo,
        ScreenshotCategory::Unknown,
    ];

    /// Stable machine identifier
    pub fn id(&self) -> &'static str {
        match self {
            ScreenshotCategory::Chat => "chat",
            ScreenshotCategory::Meme => "meme",
            ScreenshotCategory::Ui => "ui",
            ScreenshotCategory::TextDocument => "textDocument",
            ScreenshotCategory::Photo => "photo",
            ScreenshotCategory::Unknown => "unknown",
        }
    }

    /// Human-readable title shown to users
    pub fn title(&self) -> &'static str {
        TITLES
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, title)| *title)
            .unwrap_or("Unklar")
    }
}

impl std::fmt::Display for ScreenshotCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_title() {
        for category in ScreenshotCategory::ALL {
            assert!(
                TITLES.iter().any(|(c, _)| *c == category),
                "missing title for {:?}",
                category
            );
        }
    }

    #[test]
    fn titles_match_display() {
        assert_eq!(ScreenshotCategory::Chat.to_string(), "Chat / Messaging");
        assert_eq!(ScreenshotCategory::Ui.to_string(), "App/Website UI");
        assert_eq!(ScreenshotCategory::TextDocument.to_string(), "Textdokument");
        assert_eq!(ScreenshotCategory::Photo.to_string(), "Foto");
        assert_eq!(ScreenshotCategory::Unknown.to_string(), "Unklar");
    }

    #[test]
    fn serializes_with_stable_ids() {
        for category in ScreenshotCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.id()));
        }
    }
}
