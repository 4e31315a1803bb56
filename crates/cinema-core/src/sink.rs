//! Event sink abstraction.
//!
//! Bookings live only for the lifetime of the process, so published events
//! are not stored for replay. A sink receives them as flat records, which is
//! all an audit log or a test needs.

use serde::Serialize;
use uuid::Uuid;

use crate::event::DomainEvent;

/// Flattened representation of a published domain event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Aggregate this event belongs to.
    pub aggregate_id: Uuid,
    /// Event type name.
    pub event_type: String,
    /// Serialized event payload.
    pub payload: serde_json::Value,
    /// Sequence number within the aggregate.
    pub sequence_number: i64,
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Causation ID linking to the causing command.
    pub causation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

impl EventRecord {
    /// Flattens a domain event into a record.
    #[must_use]
    pub fn from_event<E: DomainEvent>(event: &E) -> Self {
        let meta = event.metadata();
        Self {
            event_id: meta.event_id,
            aggregate_id: meta.aggregate_id,
            event_type: event.event_type().to_owned(),
            payload: event.to_payload(),
            sequence_number: meta.sequence_number,
            correlation_id: meta.correlation_id,
            causation_id: meta.causation_id,
            occurred_at: meta.occurred_at,
        }
    }
}

/// Receiver of published domain events.
pub trait EventSink {
    /// Publishes a batch of events, in order.
    fn publish(&self, events: &[EventRecord]);
}
