//! # Classifier
//!
//! Runs the external services on an image, extracts features, decides and
//! assembles the result.
//!
//! ## Error policy
//! - Service failures abort the classification by default
//!   ([`ServiceFailurePolicy::Abort`]) or count as zero observations
//!   ([`ServiceFailurePolicy::TreatAsEmpty`]).
//! - Feature extraction never fails.
//!
//! ## Example
//! ```rust,ignore
//! let classifier = ScreenshotClassifier::builder(recognizer, labeler)
//!     .config(DecisionConfig::default())
//!     .build();
//!
//! let result = classifier.classify(&image)?;
//! println!("{}", result.primary_category);
//! ```

mod traits;

pub use traits::{ImageLabeler, RecognitionLevel, RecognitionOptions, TextRecognizer};

use crate::core::decision::{DecisionConfig, DecisionEngine};
use crate::core::features::{extract_features, TextObservation};
use crate::core::labels::{rank_by_confidence, ClassificationObservation};
use crate::core::report::{assemble, ClassificationResult};
use crate::error::{Result, ServiceError};
use crate::events::{null_sender, ClassifyPhase, Event, EventSender};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// What to do when a recognition service fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceFailurePolicy {
    /// Abort and report the failure to the user
    #[default]
    Abort,
    /// Log the failure and continue with no observations
    TreatAsEmpty,
}

/// Builder for [`ScreenshotClassifier`]
pub struct ClassifierBuilder {
    recognizer: Box<dyn TextRecognizer>,
    labeler: Box<dyn ImageLabeler>,
    config: DecisionConfig,
    options: RecognitionOptions,
    failure_policy: ServiceFailurePolicy,
}

impl ClassifierBuilder {
    pub fn new(recognizer: Box<dyn TextRecognizer>, labeler: Box<dyn ImageLabeler>) -> Self {
        Self {
            recognizer,
            labeler,
            config: DecisionConfig::default(),
            options: RecognitionOptions::default(),
            failure_policy: ServiceFailurePolicy::default(),
        }
    }

    /// Set keywords and thresholds
    pub fn config(mut self, config: DecisionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set text recognition options
    pub fn recognition_options(mut self, options: RecognitionOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the service failure policy
    pub fn failure_policy(mut self, policy: ServiceFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn build(self) -> ScreenshotClassifier {
        ScreenshotClassifier {
            recognizer: self.recognizer,
            labeler: self.labeler,
            engine: DecisionEngine::new(self.config),
            options: self.options,
            failure_policy: self.failure_policy,
        }
    }
}

/// Classifies screenshots. Holds no per-image state.
pub struct ScreenshotClassifier {
    recognizer: Box<dyn TextRecognizer>,
    labeler: Box<dyn ImageLabeler>,
    engine: DecisionEngine,
    options: RecognitionOptions,
    failure_policy: ServiceFailurePolicy,
}

impl ScreenshotClassifier {
    pub fn builder(
        recognizer: Box<dyn TextRecognizer>,
        labeler: Box<dyn ImageLabeler>,
    ) -> ClassifierBuilder {
        ClassifierBuilder::new(recognizer, labeler)
    }

    /// Classify an image
    pub fn classify(&self, image: &DynamicImage) -> Result<ClassificationResult> {
        self.classify_with_events(Uuid::new_v4(), image, &null_sender())
    }

    /// Classify an image, reporting phases and the outcome to `events`
    pub fn classify_with_events(
        &self,
        job_id: Uuid,
        image: &DynamicImage,
        events: &EventSender,
    ) -> Result<ClassificationResult> {
        let start = Instant::now();
        events.send(Event::Started {
            job_id,
            width: image.width(),
            height: image.height(),
        });

        match self.run(job_id, image, events) {
            Ok(result) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                info!(
                    %job_id,
                    category = result.primary_category.id(),
                    rule = ?result.rule,
                    duration_ms,
                    "classified screenshot"
                );
                events.send(Event::Completed {
                    job_id,
                    result: Box::new(result.clone()),
                    duration_ms,
                });
                Ok(result)
            }
            Err(e) => {
                events.send(Event::Failed {
                    job_id,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Classify on a worker thread.
    ///
    /// Progress and the outcome arrive on `events`; the join handle also
    /// yields the result. The image is moved into the worker and dropped
    /// once the job ends.
    pub fn spawn_classification(
        self: &Arc<Self>,
        image: DynamicImage,
        events: EventSender,
    ) -> (Uuid, JoinHandle<Result<ClassificationResult>>) {
        let job_id = Uuid::new_v4();
        let classifier = Arc::clone(self);

        let handle =
            thread::spawn(move || classifier.classify_with_events(job_id, &image, &events));

        (job_id, handle)
    }

    fn run(
        &self,
        job_id: Uuid,
        image: &DynamicImage,
        events: &EventSender,
    ) -> Result<ClassificationResult> {
        events.send(Event::PhaseChanged {
            job_id,
            phase: ClassifyPhase::Recognizing,
        });
        let text_observations = self.recognize_text(image)?;
        let label_observations = self.classify_labels(image)?;

        events.send(Event::PhaseChanged {
            job_id,
            phase: ClassifyPhase::Extracting,
        });
        let features = extract_features(image, &text_observations);

        events.send(Event::PhaseChanged {
            job_id,
            phase: ClassifyPhase::Deciding,
        });
        let decision = self
            .engine
            .decide(&features.text, features.brightness, &label_observations);

        Ok(assemble(decision, &features, &label_observations))
    }

    fn recognize_text(&self, image: &DynamicImage) -> Result<Vec<TextObservation>> {
        match self.recognizer.recognize_text(image, &self.options) {
            Ok(observations) => Ok(observations),
            Err(e) => self.tolerate(e),
        }
    }

    fn classify_labels(&self, image: &DynamicImage) -> Result<Vec<ClassificationObservation>> {
        match self.labeler.classify_image(image) {
            Ok(mut observations) => {
                rank_by_confidence(&mut observations);
                Ok(observations)
            }
            Err(e) => self.tolerate(e),
        }
    }

    fn tolerate<T>(&self, error: ServiceError) -> Result<Vec<T>> {
        match self.failure_policy {
            ServiceFailurePolicy::Abort => Err(error.into()),
            ServiceFailurePolicy::TreatAsEmpty => {
                warn!(error = %error, "recognition service failed, continuing without observations");
                Ok(Vec::new())
            }
        }
    }
}
