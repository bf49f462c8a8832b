//! # Category Decision Engine
//!
//! Maps extracted features to one primary category and up to two
//! secondary candidates.
//!
//! ## Primary rules (first match wins)
//! 1. Dense text: chat if the top label mentions chat/messaging, else a text document
//! 2. Top label mentions a screen → UI
//! 3. Bright with almost no text → photo
//! 4. Any label mentions a comic or meme → meme
//! 5. Some text on a non-dark background → chat
//! 6. Otherwise unknown
//!
//! The rule order encodes priority; the rules overlap on purpose.
//!
//! ## Secondary candidates
//! Every other category is tested with its own independent predicate, in
//! enumeration order, and the first two that pass are kept.

mod config;

pub use config::{DecisionConfig, KeywordConfig, Thresholds};

use crate::core::category::ScreenshotCategory;
use crate::core::features::TextStats;
use crate::core::labels::{contains_any, contains_keyword, top_identifier, ClassificationObservation};
use serde::{Deserialize, Serialize};

/// The primary rule that produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimaryRule {
    /// Dense text with a chat-like top label
    DenseTextChat,
    /// Dense text without a chat-like top label
    DenseTextDocument,
    /// Screen-like top label
    ScreenLabel,
    /// Bright image with little text
    BrightPhoto,
    /// Comic / meme label anywhere in the list
    MemeLabel,
    /// Some text on a reasonably bright image
    LightText,
    /// Nothing matched
    Fallback,
}

impl PrimaryRule {
    /// Category this rule assigns
    pub fn category(&self) -> ScreenshotCategory {
        match self {
            PrimaryRule::DenseTextChat | PrimaryRule::LightText => ScreenshotCategory::Chat,
            PrimaryRule::DenseTextDocument => ScreenshotCategory::TextDocument,
            PrimaryRule::ScreenLabel => ScreenshotCategory::Ui,
            PrimaryRule::BrightPhoto => ScreenshotCategory::Photo,
            PrimaryRule::MemeLabel => ScreenshotCategory::Meme,
            PrimaryRule::Fallback => ScreenshotCategory::Unknown,
        }
    }
}

/// Output of the decision engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub primary: ScreenshotCategory,
    pub rule: PrimaryRule,
    /// At most `max_secondary` entries, never containing `primary`
    pub secondary: Vec<ScreenshotCategory>,
}

/// Rule evaluator. Stateless apart from its configuration.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Decide the primary and secondary categories
    pub fn decide(
        &self,
        text: &TextStats,
        brightness: f64,
        observations: &[ClassificationObservation],
    ) -> Decision {
        let rule = self.primary_rule(text, brightness, observations);
        let primary = rule.category();

        let secondary = ScreenshotCategory::ALL
            .into_iter()
            .filter(|&category| {
                category != primary && self.is_candidate(category, text, brightness, observations)
            })
            .take(self.config.thresholds.max_secondary)
            .collect();

        Decision {
            primary,
            rule,
            secondary,
        }
    }

    /// Evaluate the ordered primary rules
    pub fn primary_rule(
        &self,
        text: &TextStats,
        brightness: f64,
        observations: &[ClassificationObservation],
    ) -> PrimaryRule {
        let keywords = &self.config.keywords;
        let t = &self.config.thresholds;
        let top = top_identifier(observations);

        if text.block_count > t.dense_text_blocks && text.coverage > t.dense_text_coverage {
            if contains_keyword(&top, &keywords.chat) {
                return PrimaryRule::DenseTextChat;
            }
            return PrimaryRule::DenseTextDocument;
        }

        if contains_keyword(&top, &keywords.ui) {
            return PrimaryRule::ScreenLabel;
        }

        if brightness > t.photo_brightness && text.block_count < t.photo_max_blocks {
            return PrimaryRule::BrightPhoto;
        }

        if contains_any(observations, &keywords.meme) {
            return PrimaryRule::MemeLabel;
        }

        if text.block_count >= t.light_text_min_blocks && brightness > t.light_text_brightness {
            return PrimaryRule::LightText;
        }

        PrimaryRule::Fallback
    }

    /// Independent membership test used for secondary candidates
    pub fn is_candidate(
        &self,
        category: ScreenshotCategory,
        text: &TextStats,
        brightness: f64,
        observations: &[ClassificationObservation],
    ) -> bool {
        let keywords = &self.config.keywords;
        let t = &self.config.thresholds;

        match category {
            ScreenshotCategory::Chat => {
                text.block_count > 0 && brightness > t.chat_candidate_brightness
            }
            ScreenshotCategory::Meme => contains_any(observations, &keywords.meme),
            ScreenshotCategory::Ui => contains_any(observations, &keywords.ui_candidate),
            ScreenshotCategory::TextDocument => text.coverage > t.document_candidate_coverage,
            ScreenshotCategory::Photo => {
                brightness > t.photo_candidate_brightness
                    && text.block_count < t.photo_candidate_max_blocks
            }
            ScreenshotCategory::Unknown => observations.is_empty(),
        }
    }
}

/// Decide with the default configuration
pub fn decide(
    text: &TextStats,
    brightness: f64,
    observations: &[ClassificationObservation],
) -> Decision {
    DecisionEngine::default().decide(text, brightness, observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(block_count: usize, coverage: f64) -> TextStats {
        TextStats {
            coverage,
            block_count,
            character_count: block_count * 10,
        }
    }

    fn labels(pairs: &[(&str, f32)]) -> Vec<ClassificationObservation> {
        pairs
            .iter()
            .map(|(id, conf)| ClassificationObservation::new(*id, *conf))
            .collect()
    }

    #[test]
    fn dense_text_with_chat_label_is_chat() {
        let decision = decide(&stats(5, 0.12), 0.5, &labels(&[("chat_app", 0.8)]));
        assert_eq!(decision.primary, ScreenshotCategory::Chat);
        assert_eq!(decision.rule, PrimaryRule::DenseTextChat);
    }

    #[test]
    fn dense_text_without_chat_label_is_document() {
        let decision = decide(&stats(5, 0.12), 0.5, &labels(&[("document_scan", 0.8)]));
        assert_eq!(decision.primary, ScreenshotCategory::TextDocument);
        assert_eq!(decision.rule, PrimaryRule::DenseTextDocument);
    }

    #[test]
    fn messaging_label_counts_as_chat() {
        let decision = decide(&stats(6, 0.3), 0.2, &labels(&[("Messaging", 0.4)]));
        assert_eq!(decision.rule, PrimaryRule::DenseTextChat);
    }

    #[test]
    fn bright_empty_image_is_photo_with_unknown_candidate() {
        let decision = decide(&stats(0, 0.0), 0.85, &[]);
        assert_eq!(decision.primary, ScreenshotCategory::Photo);
        assert_eq!(decision.rule, PrimaryRule::BrightPhoto);
        assert_eq!(decision.secondary, vec![ScreenshotCategory::Unknown]);
    }

    #[test]
    fn dark_empty_image_is_unknown() {
        let decision = decide(&stats(0, 0.0), 0.1, &[]);
        assert_eq!(decision.primary, ScreenshotCategory::Unknown);
        assert_eq!(decision.rule, PrimaryRule::Fallback);
        assert!(decision.secondary.is_empty());
    }

    #[test]
    fn meme_label_is_meme() {
        let decision = decide(&stats(0, 0.0), 0.4, &labels(&[("meme_template", 0.9)]));
        assert_eq!(decision.primary, ScreenshotCategory::Meme);
        assert_eq!(decision.rule, PrimaryRule::MemeLabel);
        assert!(decision.secondary.is_empty());
    }

    #[test]
    fn meme_label_matches_below_the_top() {
        let observations = labels(&[("outdoor", 0.7), ("Comic", 0.2)]);
        let decision = decide(&stats(0, 0.0), 0.5, &observations);
        assert_eq!(decision.primary, ScreenshotCategory::Meme);
    }

    #[test]
    fn screen_label_is_case_insensitive() {
        let lower = decide(&stats(1, 0.01), 0.5, &labels(&[("screengrab123", 0.6)]));
        let mixed = decide(&stats(1, 0.01), 0.5, &labels(&[("Screengrab123", 0.6)]));
        assert_eq!(lower.primary, ScreenshotCategory::Ui);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn screen_label_only_checks_top_identifier() {
        let observations = labels(&[("document", 0.9), ("monitor", 0.5)]);
        let decision = decide(&stats(0, 0.0), 0.1, &observations);
        assert_ne!(decision.rule, PrimaryRule::ScreenLabel);
    }

    #[test]
    fn dense_text_thresholds_are_strict() {
        let observations = labels(&[("screengrab", 0.9)]);
        let decision = decide(&stats(3, 0.05), 0.5, &observations);
        assert_eq!(decision.rule, PrimaryRule::ScreenLabel);

        let decision = decide(&stats(4, 0.05), 0.5, &observations);
        assert_eq!(decision.rule, PrimaryRule::ScreenLabel);

        let decision = decide(&stats(3, 0.06), 0.5, &observations);
        assert_eq!(decision.rule, PrimaryRule::ScreenLabel);
    }

    #[test]
    fn more_blocks_switch_chat_rule() {
        let observations = labels(&[("chat_app", 0.7)]);
        let path: Vec<PrimaryRule> = (0..=4)
            .map(|blocks| decide(&stats(blocks, 0.12), 0.5, &observations).rule)
            .collect();

        assert_eq!(
            path,
            vec![
                PrimaryRule::Fallback,
                PrimaryRule::LightText,
                PrimaryRule::LightText,
                PrimaryRule::LightText,
                PrimaryRule::DenseTextChat,
            ]
        );
    }

    #[test]
    fn photo_beats_meme() {
        let decision = decide(&stats(1, 0.01), 0.9, &labels(&[("meme", 0.9)]));
        assert_eq!(decision.primary, ScreenshotCategory::Photo);
        assert_eq!(decision.secondary, vec![ScreenshotCategory::Chat, ScreenshotCategory::Meme]);
    }

    #[test]
    fn secondary_is_capped_in_enumeration_order() {
        let observations = labels(&[("document", 0.9), ("website", 0.5), ("meme", 0.2)]);
        let decision = decide(&stats(5, 0.12), 0.65, &observations);

        assert_eq!(decision.primary, ScreenshotCategory::TextDocument);
        assert_eq!(decision.secondary, vec![ScreenshotCategory::Chat, ScreenshotCategory::Meme]);
    }

    #[test]
    fn secondary_never_contains_primary() {
        let label_sets = [
            labels(&[]),
            labels(&[("chat", 0.9)]),
            labels(&[("screen", 0.9), ("meme", 0.1)]),
            labels(&[("website", 0.9)]),
            labels(&[("comic", 0.9)]),
        ];

        for observations in &label_sets {
            for blocks in [0, 1, 2, 4, 10] {
                for coverage in [0.0, 0.045, 0.2] {
                    for brightness in [0.0, 0.35, 0.65, 0.75, 1.0] {
                        let decision = decide(&stats(blocks, coverage), brightness, observations);
                        assert!(decision.secondary.len() <= 2);
                        assert!(!decision.secondary.contains(&decision.primary));
                        assert_eq!(decision.primary, decision.rule.category());
                    }
                }
            }
        }
    }

    #[test]
    fn decision_is_repeatable() {
        let observations = labels(&[("website", 0.6), ("chat", 0.3)]);
        let engine = DecisionEngine::default();
        let first = engine.decide(&stats(2, 0.08), 0.55, &observations);
        let second = engine.decide(&stats(2, 0.08), 0.55, &observations);
        assert_eq!(first, second);
    }

    #[test]
    fn custom_keywords_change_matching() {
        let mut config = DecisionConfig::default();
        config.keywords.meme = vec!["cartoon".to_string()];
        let engine = DecisionEngine::new(config);

        let decision = engine.decide(&stats(0, 0.0), 0.4, &labels(&[("Cartoon", 0.8)]));
        assert_eq!(decision.primary, ScreenshotCategory::Meme);

        let decision = engine.decide(&stats(0, 0.0), 0.4, &labels(&[("meme", 0.8)]));
        assert_eq!(decision.primary, ScreenshotCategory::Unknown);
    }
}
