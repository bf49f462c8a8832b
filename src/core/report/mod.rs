//! # Result Assembler
//!
//! Packages a decision and its features into the final result, with a
//! fixed set of diagnostics for display.

use crate::core::category::ScreenshotCategory;
use crate::core::decision::{Decision, PrimaryRule};
use crate::core::features::ImageFeatures;
use crate::core::labels::{summarize_top, ClassificationObservation, SUMMARY_LABELS};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const KEY_TEXT_BLOCKS: &str = "Textblöcke";
pub const KEY_CHARACTERS: &str = "Zeichen";
pub const KEY_TEXT_AREA: &str = "Textfläche";
pub const KEY_BRIGHTNESS: &str = "Helligkeit";
pub const KEY_TOP_LABELS: &str = "Top-Labels";

/// Ordered key/value diagnostics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<(String, String)>,
}

impl Diagnostics {
    /// Insert or replace a value, keeping the original position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for Diagnostics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Final classification handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub primary_category: ScreenshotCategory,
    pub secondary_categories: Vec<ScreenshotCategory>,
    /// Rule that picked the primary category
    pub rule: PrimaryRule,
    pub diagnostics: Diagnostics,
}

impl ClassificationResult {
    /// Display titles of the secondary categories
    pub fn secondary_titles(&self) -> Vec<&'static str> {
        self.secondary_categories.iter().map(|c| c.title()).collect()
    }
}

/// Build the diagnostics for a set of features and labels
pub fn build_diagnostics(
    features: &ImageFeatures,
    observations: &[ClassificationObservation],
) -> Diagnostics {
    let mut diagnostics = Diagnostics::default();
    diagnostics.insert(KEY_TEXT_BLOCKS, features.text.block_count.to_string());
    diagnostics.insert(KEY_CHARACTERS, features.text.character_count.to_string());
    diagnostics.insert(KEY_TEXT_AREA, format!("{:.0}%", features.text.coverage * 100.0));
    diagnostics.insert(KEY_BRIGHTNESS, format!("{:.2}", features.brightness));
    diagnostics.insert(KEY_TOP_LABELS, summarize_top(observations, SUMMARY_LABELS));
    diagnostics
}

/// Assemble the final result
pub fn assemble(
    decision: Decision,
    features: &ImageFeatures,
    observations: &[ClassificationObservation],
) -> ClassificationResult {
    ClassificationResult {
        primary_category: decision.primary,
        secondary_categories: decision.secondary,
        rule: decision.rule,
        diagnostics: build_diagnostics(features, observations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::TextStats;

    fn features() -> ImageFeatures {
        ImageFeatures {
            text: TextStats {
                coverage: 0.123,
                block_count: 7,
                character_count: 312,
            },
            brightness: 0.8123,
            width: 1170,
            height: 2532,
        }
    }

    #[test]
    fn formats_diagnostics() {
        let observations = vec![
            ClassificationObservation::new("screenshot", 0.9),
            ClassificationObservation::new("text", 0.25),
        ];
        let diagnostics = build_diagnostics(&features(), &observations);

        assert_eq!(diagnostics.get(KEY_TEXT_BLOCKS), Some("7"));
        assert_eq!(diagnostics.get(KEY_CHARACTERS), Some("312"));
        assert_eq!(diagnostics.get(KEY_TEXT_AREA), Some("12%"));
        assert_eq!(diagnostics.get(KEY_BRIGHTNESS), Some("0.81"));
        assert_eq!(diagnostics.get(KEY_TOP_LABELS), Some("screenshot 90%, text 25%"));
    }

    #[test]
    fn keeps_key_order() {
        let diagnostics = build_diagnostics(&features(), &[]);
        let keys: Vec<&str> = diagnostics.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            [KEY_TEXT_BLOCKS, KEY_CHARACTERS, KEY_TEXT_AREA, KEY_BRIGHTNESS, KEY_TOP_LABELS]
        );
    }

    #[test]
    fn insert_replaces_existing_key() {
        let mut diagnostics = Diagnostics::default();
        diagnostics.insert("a", "1");
        diagnostics.insert("a", "2");
        assert_eq!(diagnostics.iter().count(), 1);
        assert_eq!(diagnostics.get("a"), Some("2"));
    }

    #[test]
    fn result_serializes_diagnostics_as_object() {
        let decision = Decision {
            primary: ScreenshotCategory::Chat,
            rule: PrimaryRule::LightText,
            secondary: vec![ScreenshotCategory::Photo],
        };
        let result = assemble(decision, &features(), &[]);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["primary_category"], "chat");
        assert_eq!(json["secondary_categories"][0], "photo");
        assert_eq!(json["diagnostics"]["Zeichen"], "312");
        assert_eq!(result.secondary_titles(), vec!["Foto"]);
    }
}
