//! Classification event channel backed by crossbeam-channel.
//!
//! The worker thread holds the sender; the thread that owns presentation
//! drains the receiver until the worker finishes.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Worker-side handle. Clones share one channel.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Deliver an event; a disconnected receiver drops it.
    pub fn send(&self, event: Event) {
        if self.inner.send(event).is_err() {
            tracing::trace!("event receiver disconnected");
        }
    }
}

/// Presentation-side handle
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Events in emission order, ending once the worker drops its sender
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

pub struct EventChannel;

impl EventChannel {
    /// Connected sender/receiver pair
    pub fn new() -> (EventSender, EventReceiver) {
        let (inner_tx, inner_rx) = unbounded();
        (EventSender { inner: inner_tx }, EventReceiver { inner: inner_rx })
    }
}

/// Sender for callers that only want the returned result
pub fn null_sender() -> EventSender {
    EventChannel::new().0
}
