//! # Events Module
//!
//! Result delivery between a classification worker and the presentation
//! layer.
//!
//! ## Design
//! The classifier never touches UI state. It emits events through a
//! channel, and whichever thread owns presentation receives them.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//! let (job_id, handle) = classifier.spawn_classification(image, sender);
//!
//! for event in receiver.iter() {
//!     match event {
//!         Event::Completed { result, .. } => println!("{}", result.primary_category),
//!         Event::Failed { message, .. } => eprintln!("{}", message),
//!         _ => {}
//!     }
//! }
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
