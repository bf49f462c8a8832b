//! Text statistics from OCR observations.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Bounding box in normalized image coordinates (all values in [0, 1])
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// This box clipped to the unit square
    pub fn clamped(&self) -> Self {
        let left = self.x.clamp(0.0, 1.0);
        let top = self.y.clamp(0.0, 1.0);
        let right = (self.x + self.width.max(0.0)).clamp(0.0, 1.0);
        let bottom = (self.y + self.height.max(0.0)).clamp(0.0, 1.0);
        Self::new(left, top, right - left, bottom - top)
    }

    /// Fraction of the image covered by this box, never negative
    pub fn area(&self) -> f64 {
        let rect = self.clamped();
        rect.width * rect.height
    }
}

/// One recognized string for a text region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedText {
    pub text: String,
    #[serde(default = "full_confidence")]
    pub confidence: f32,
}

fn full_confidence() -> f32 {
    1.0
}

/// A single text region detected by OCR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObservation {
    pub bounding_box: NormalizedRect,
    /// Candidate strings; the recognizer may return none
    #[serde(default)]
    pub candidates: Vec<RecognizedText>,
}

impl TextObservation {
    /// Observation with a single candidate string
    pub fn new(bounding_box: NormalizedRect, text: impl Into<String>) -> Self {
        Self {
            bounding_box,
            candidates: vec![RecognizedText {
                text: text.into(),
                confidence: 1.0,
            }],
        }
    }

    /// Highest-confidence candidate string, or `""`
    pub fn best_candidate(&self) -> &str {
        self.candidates
            .iter()
            .fold(None::<&RecognizedText>, |best, candidate| match best {
                Some(b) if b.confidence >= candidate.confidence => Some(b),
                _ => Some(candidate),
            })
            .map(|c| c.text.as_str())
            .unwrap_or("")
    }
}

/// Aggregate text statistics for one image
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextStats {
    /// Sum of box areas. Overlaps add up, so this can exceed 1.0.
    pub coverage: f64,
    /// Number of text regions
    pub block_count: usize,
    /// User-perceived characters (grapheme clusters) across all best candidates
    pub character_count: usize,
}

/// Compute text statistics.
///
/// `image_area` is width * height in pixels; a zero-area image yields
/// empty statistics regardless of the observations.
pub fn analyze_text(observations: &[TextObservation], image_area: u64) -> TextStats {
    if image_area == 0 {
        return TextStats::default();
    }

    let coverage = observations.iter().map(|o| o.bounding_box.area()).sum();
    let character_count = observations
        .iter()
        .map(|o| o.best_candidate().graphemes(true).count())
        .sum();

    TextStats {
        coverage,
        block_count: observations.len(),
        character_count,
    }
}
