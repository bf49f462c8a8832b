//! # Screenshot Classifier
//!
//! Sorts screenshots into coarse categories (chat, meme, UI, text document,
//! photo) from on-device text detection, brightness and image labels.
//!
//! ## Core Philosophy
//! - **Deterministic** - a fixed rule table over a handful of scalar features
//! - **Explainable** - every result carries the rule that fired and its inputs
//! - **Never crash on odd input** - the worst case is an "Unklar" result
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - Feature extraction, decision rules and result assembly
//! - `events` - Result delivery to whichever thread owns the UI
//! - `error` - User-facing error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{ClassifierError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. `default_filter`
/// applies when `RUST_LOG` is not set.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // A subscriber may already be installed by an embedding application
    let _ = tracing::subscriber::set_global_default(subscriber);
}
