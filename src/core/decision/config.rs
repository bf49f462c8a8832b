//! Tunable keywords and thresholds for the decision rules.
//!
//! Classifier identifiers are an uncontrolled vocabulary, so the keyword
//! lists are data rather than code.

use crate::error::{ClassifierError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Keyword substrings matched case-insensitively against classifier labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Top label keywords that turn dense text into a chat
    pub chat: Vec<String>,
    /// Top label keywords that mark an app / website interface
    pub ui: Vec<String>,
    /// Keywords (any label) that mark a meme
    pub meme: Vec<String>,
    /// Keywords (any label) that make UI a secondary candidate
    pub ui_candidate: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            chat: strings(&["chat", "messag"]),
            ui: strings(&["screengrab", "monitor", "screen"]),
            meme: strings(&["comic", "meme"]),
            ui_candidate: strings(&["screen", "website"]),
        }
    }
}

/// Numeric thresholds. Comparisons are strict unless the name says `min`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Dense text requires more than this many blocks
    pub dense_text_blocks: usize,
    /// ... and more than this coverage
    pub dense_text_coverage: f64,
    /// Photo requires brightness above this
    pub photo_brightness: f64,
    /// ... and fewer than this many blocks
    pub photo_max_blocks: usize,
    /// Light text chat requires at least this many blocks
    pub light_text_min_blocks: usize,
    /// ... and brightness above this
    pub light_text_brightness: f64,
    /// Chat candidate brightness
    pub chat_candidate_brightness: f64,
    /// Text document candidate coverage
    pub document_candidate_coverage: f64,
    /// Photo candidate brightness
    pub photo_candidate_brightness: f64,
    /// Photo candidate requires fewer than this many blocks
    pub photo_candidate_max_blocks: usize,
    /// Secondary candidates kept
    pub max_secondary: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            dense_text_blocks: 3,
            dense_text_coverage: 0.05,
            photo_brightness: 0.7,
            photo_max_blocks: 2,
            light_text_min_blocks: 1,
            light_text_brightness: 0.3,
            chat_candidate_brightness: 0.3,
            document_candidate_coverage: 0.04,
            photo_candidate_brightness: 0.6,
            photo_candidate_max_blocks: 2,
            max_secondary: 2,
        }
    }
}

/// Full decision configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    pub keywords: KeywordConfig,
    pub thresholds: Thresholds,
}

impl DecisionConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClassifierError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&contents)
            .map_err(|e| ClassifierError::Config(format!("invalid {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let config = DecisionConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored: DecisionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "thresholds": { "photo_brightness": 0.8 } }"#;
        let config: DecisionConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.thresholds.photo_brightness, 0.8);
        assert_eq!(config.thresholds.dense_text_blocks, 3);
        assert_eq!(config.keywords, KeywordConfig::default());
    }

    #[test]
    fn load_reports_bad_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let error = DecisionConfig::load(&path).unwrap_err();
        assert!(matches!(error, ClassifierError::Config(_)));
        assert!(error.to_string().contains("config.json"));
    }

    #[test]
    fn load_reads_keywords() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "keywords": { "meme": ["cartoon"] } }"#).unwrap();

        let config = DecisionConfig::load(&path).unwrap();
        assert_eq!(config.keywords.meme, vec!["cartoon".to_string()]);
        assert_eq!(config.keywords.chat, KeywordConfig::default().chat);
    }
}
