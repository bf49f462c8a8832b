//! Precomputed observations stored next to an image.
//!
//! A sidecar file holds the output of an OCR pass and an image classifier
//! as JSON:
//!
//! ```json
//! {
//!   "text": [
//!     { "bounding_box": { "x": 0.1, "y": 0.2, "width": 0.5, "height": 0.04 },
//!       "candidates": [ { "text": "Hallo", "confidence": 0.9 } ] }
//!   ],
//!   "labels": [ { "identifier": "screenshot", "confidence": 0.82 } ]
//! }
//! ```
//!
//! It implements both service traits, so the classifier can run without an
//! OCR engine or model on the machine.

use crate::core::classifier::{ImageLabeler, RecognitionOptions, TextRecognizer};
use crate::core::features::TextObservation;
use crate::core::labels::ClassificationObservation;
use crate::error::ServiceError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Suffix appended to the image file name to find its sidecar
pub const SIDECAR_SUFFIX: &str = ".observations.json";

/// Observations loaded from a sidecar file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SidecarObservations {
    #[serde(default)]
    pub text: Vec<TextObservation>,
    #[serde(default)]
    pub labels: Vec<ClassificationObservation>,
}

impl SidecarObservations {
    /// Read and parse a sidecar file
    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ServiceError::ObservationsNotFound {
                path: path.to_path_buf(),
            },
            _ => ServiceError::InvalidObservations {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        serde_json::from_str(&contents).map_err(|e| ServiceError::InvalidObservations {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Default sidecar location for an image: `shot.png` → `shot.png.observations.json`
    pub fn path_for(image_path: &Path) -> PathBuf {
        let mut name = image_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(SIDECAR_SUFFIX);
        image_path.with_file_name(name)
    }
}

impl TextRecognizer for SidecarObservations {
    fn recognize_text(
        &self,
        _image: &DynamicImage,
        _options: &RecognitionOptions,
    ) -> Result<Vec<TextObservation>, ServiceError> {
        Ok(self.text.clone())
    }
}

impl ImageLabeler for SidecarObservations {
    fn classify_image(
        &self,
        _image: &DynamicImage,
    ) -> Result<Vec<ClassificationObservation>, ServiceError> {
        Ok(self.labels.clone())
    }
}

/// A sidecar file read on every service call.
///
/// Read errors surface as service failures, so the classifier's failure
/// policy decides whether they abort the classification.
#[derive(Debug, Clone)]
pub struct SidecarFile {
    path: PathBuf,
}

impl SidecarFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sidecar at the default location for `image_path`
    pub fn for_image(image_path: &Path) -> Self {
        Self::new(SidecarObservations::path_for(image_path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextRecognizer for SidecarFile {
    fn recognize_text(
        &self,
        _image: &DynamicImage,
        _options: &RecognitionOptions,
    ) -> Result<Vec<TextObservation>, ServiceError> {
        Ok(SidecarObservations::load(&self.path)?.text)
    }
}

impl ImageLabeler for SidecarFile {
    fn classify_image(
        &self,
        _image: &DynamicImage,
    ) -> Result<Vec<ClassificationObservation>, ServiceError> {
        Ok(SidecarObservations::load(&self.path)?.labels)
    }
}
