//! Event type definitions for classification progress and results.

use crate::core::report::ClassificationResult;
use serde::Serialize;
use uuid::Uuid;

/// All events emitted while classifying a screenshot
#[derive(Debug, Clone, Serialize)]
pub enum Event {
    /// A classification job has started
    Started {
        job_id: Uuid,
        width: u32,
        height: u32,
    },
    /// Moving to a new phase
    PhaseChanged { job_id: Uuid, phase: ClassifyPhase },
    /// Classification finished
    Completed {
        job_id: Uuid,
        result: Box<ClassificationResult>,
        duration_ms: u64,
    },
    /// Classification aborted; `message` is meant for the user
    Failed { job_id: Uuid, message: String },
}

impl Event {
    /// Job this event belongs to
    pub fn job_id(&self) -> Uuid {
        match self {
            Event::Started { job_id, .. }
            | Event::PhaseChanged { job_id, .. }
            | Event::Completed { job_id, .. }
            | Event::Failed { job_id, .. } => *job_id,
        }
    }

    /// True for the last event of a job
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::Completed { .. } | Event::Failed { .. })
    }
}

/// Phases of a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassifyPhase {
    /// Running the external text recognizer and image labeler
    Recognizing,
    /// Deriving text statistics and brightness
    Extracting,
    /// Evaluating rules and assembling the result
    Deciding,
}

impl std::fmt::Display for ClassifyPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifyPhase::Recognizing => write!(f, "Recognizing"),
            ClassifyPhase::Extracting => write!(f, "Extracting features"),
            ClassifyPhase::Deciding => write!(f, "Deciding"),
        }
    }
}
