//! # Core Module
//!
//! The UI-agnostic classification engine.
//!
//! ## Modules
//! - `features` - Text statistics and brightness from OCR output and pixels
//! - `labels` - Summaries and keyword checks over classifier labels
//! - `decision` - The rule table mapping features to categories
//! - `report` - Assembles results and diagnostics
//! - `classifier` - Runs the services and ties everything together
//! - `category` - The closed set of screenshot categories
//! - `loader` - Decodes image files
//! - `sidecar` - Precomputed observations stored as JSON

pub mod category;
pub mod classifier;
pub mod decision;
pub mod features;
pub mod labels;
pub mod loader;
pub mod report;
pub mod sidecar;

// Re-export commonly used types
pub use category::ScreenshotCategory;
pub use classifier::{ImageLabeler, ScreenshotClassifier, ServiceFailurePolicy, TextRecognizer};
pub use decision::{decide, Decision, DecisionConfig, DecisionEngine, PrimaryRule};
pub use features::{ImageFeatures, TextObservation, TextStats};
pub use labels::ClassificationObservation;
pub use report::ClassificationResult;
pub use sidecar::{SidecarFile, SidecarObservations};
