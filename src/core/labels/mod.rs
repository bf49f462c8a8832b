//! Label summarizer.
//!
//! Reduces the rank-ordered output of an image classifier to a short
//! display string and keyword predicates used by the decision engine.

use serde::{Deserialize, Serialize};

/// Number of labels shown in the diagnostics summary
pub const SUMMARY_LABELS: usize = 3;

/// One (identifier, confidence) pair from an image classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationObservation {
    /// Classifier label, e.g. "screenshot" or "document"
    pub identifier: String,
    /// Confidence in [0, 1]
    pub confidence: f32,
}

impl ClassificationObservation {
    pub fn new(identifier: impl Into<String>, confidence: f32) -> Self {
        Self {
            identifier: identifier.into(),
            confidence,
        }
    }

    /// True if the lowercased identifier contains any of `keywords`
    pub fn matches_any<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        let identifier = self.identifier.to_lowercase();
        contains_keyword(&identifier, keywords)
    }
}

/// Case-insensitive substring test of `haystack` against `keywords`.
///
/// `haystack` is expected to be lowercased already.
pub(crate) fn contains_keyword<S: AsRef<str>>(haystack: &str, keywords: &[S]) -> bool {
    keywords
        .iter()
        .any(|keyword| haystack.contains(&keyword.as_ref().to_lowercase()))
}

/// Format the first `count` observations as `"<identifier> <percent>%"`,
/// joined by `", "`.
pub fn summarize_top(observations: &[ClassificationObservation], count: usize) -> String {
    observations
        .iter()
        .take(count)
        .map(|o| format!("{} {}%", o.identifier, (o.confidence * 100.0).round() as i64))
        .collect::<Vec<_>>()
        .join(", ")
}

/// True if any observation's identifier contains any of `keywords`
pub fn contains_any<S: AsRef<str>>(observations: &[ClassificationObservation], keywords: &[S]) -> bool {
    observations.iter().any(|o| o.matches_any(keywords))
}

/// Lowercased identifier of the top-ranked observation, or `""` if none
pub fn top_identifier(observations: &[ClassificationObservation]) -> String {
    observations
        .first()
        .map(|o| o.identifier.to_lowercase())
        .unwrap_or_default()
}

/// Sort observations by descending confidence.
///
/// Stable, so ties keep the order the classifier reported.
pub fn rank_by_confidence(observations: &mut [ClassificationObservation]) {
    observations.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
