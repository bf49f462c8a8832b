//! # Error Module
//!
//! User-facing error types for the screenshot classifier.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, service names, what went wrong
//! - **Degrade, don't fail** - feature extraction problems are recovered
//!   locally and never reach the caller

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Recognition service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Classification worker stopped unexpectedly: {0}")]
    Worker(String),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Errors that occur while loading an image
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    EmptyImage { path: PathBuf },

    #[error("Failed to open image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the external text recognition / image labeling services
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Text recognition failed: {reason}")]
    TextRecognition { reason: String },

    #[error("Image classification failed: {reason}")]
    ImageClassification { reason: String },

    #[error("No observations found at {path}. Run the recognizer first or pass --observations.")]
    ObservationsNotFound { path: PathBuf },

    #[error("Invalid observations file {path}: {reason}")]
    InvalidObservations { path: PathBuf, reason: String },
}

/// Errors during feature derivation.
///
/// These never leave the feature extractor; they are logged and replaced
/// with a safe default value.
#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("Image has no area ({width}x{height})")]
    DegenerateImage { width: u32, height: u32 },

    #[error("Area-average downsample failed: {0}")]
    DownsampleFailed(String),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ClassifierError>;
