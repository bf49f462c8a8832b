//! Seams for the external recognition services.

use crate::core::features::TextObservation;
use crate::core::labels::ClassificationObservation;
use crate::error::ServiceError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Speed / accuracy trade-off requested from the text recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecognitionLevel {
    #[default]
    Fast,
    Accurate,
}

/// Options passed to every text recognition call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecognitionOptions {
    pub level: RecognitionLevel,
    /// Screenshots are full of names and UI strings, so this defaults to off
    pub uses_language_correction: bool,
}

/// Detects and recognizes text regions in an image
pub trait TextRecognizer: Send + Sync {
    fn recognize_text(
        &self,
        image: &DynamicImage,
        options: &RecognitionOptions,
    ) -> Result<Vec<TextObservation>, ServiceError>;
}

/// General-purpose image classifier
pub trait ImageLabeler: Send + Sync {
    /// Labels sorted by descending confidence
    fn classify_image(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<ClassificationObservation>, ServiceError>;
}
