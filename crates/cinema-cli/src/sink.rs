//! Event sink that writes published domain events to the log.

use cinema_core::sink::{EventRecord, EventSink};

/// Logs every published event as a structured `info` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, events: &[EventRecord]) {
        for event in events {
            tracing::info!(
                event_id = %event.event_id,
                event_type = %event.event_type,
                aggregate_id = %event.aggregate_id,
                sequence_number = event.sequence_number,
                correlation_id = %event.correlation_id,
                payload = %event.payload,
                "domain event published"
            );
        }
    }
}
