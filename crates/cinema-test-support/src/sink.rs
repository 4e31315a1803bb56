//! An `EventSink` that keeps everything it is given.

use std::sync::Mutex;

use cinema_core::sink::{EventRecord, EventSink};

/// An event sink that records every published batch in order.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    published: Mutex<Vec<EventRecord>>,
}

impl RecordingEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all events published so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn published(&self) -> Vec<EventRecord> {
        self.published.lock().unwrap().clone()
    }

    /// Event types published so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn event_types(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|record| record.event_type.clone())
            .collect()
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&self, events: &[EventRecord]) {
        self.published.lock().unwrap().extend_from_slice(events);
    }
}
