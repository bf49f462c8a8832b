//! # Feature Extractor
//!
//! Turns raw OCR observations and a decoded image into the scalar features
//! the decision engine works on:
//! - text coverage, block count and character count
//! - average brightness
//!
//! Extraction never fails. Problems computing brightness are logged and
//! replaced with a neutral fallback.

mod brightness;
mod text;

pub use brightness::{area_average, average_brightness, FALLBACK_BRIGHTNESS};
pub use text::{analyze_text, NormalizedRect, RecognizedText, TextObservation, TextStats};

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// All features derived from one image
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageFeatures {
    pub text: TextStats,
    /// Average brightness in [0, 1]
    pub brightness: f64,
    pub width: u32,
    pub height: u32,
}

/// Extract features from an image and its text observations.
///
/// Only scalars are kept; the image is not retained.
pub fn extract_features(image: &DynamicImage, observations: &[TextObservation]) -> ImageFeatures {
    let (width, height) = (image.width(), image.height());
    let text = analyze_text(observations, width as u64 * height as u64);
    let brightness = average_brightness(image);

    debug!(
        width,
        height,
        coverage = text.coverage,
        blocks = text.block_count,
        characters = text.character_count,
        brightness,
        "extracted features"
    );

    ImageFeatures {
        text,
        brightness,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[test]
    fn combines_text_and_brightness() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(20, 20, Rgb([255u8, 255, 255])));
        let observations = vec![TextObservation::new(
            NormalizedRect::new(0.1, 0.1, 0.5, 0.2),
            "Hallo",
        )];

        let features = extract_features(&image, &observations);

        assert_eq!(features.text.block_count, 1);
        assert_eq!(features.text.character_count, 5);
        assert!((features.text.coverage - 0.1).abs() < 1e-9);
        assert!(features.brightness > 0.99);
        assert_eq!((features.width, features.height), (20, 20));
    }

    #[test]
    fn empty_image_yields_neutral_features() {
        let image = DynamicImage::new_rgb8(0, 0);
        let observations = vec![TextObservation::new(NormalizedRect::new(0.0, 0.0, 1.0, 1.0), "x")];

        let features = extract_features(&image, &observations);

        assert_eq!(features.text, TextStats::default());
        assert_eq!(features.brightness, FALLBACK_BRIGHTNESS);
    }
}
