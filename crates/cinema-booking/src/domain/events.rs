//! Domain events for the Booking context.

use cinema_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identifier::BookingId;
use super::seat::Seat;

/// Event type for `ScreeningScheduled`.
pub const SCREENING_SCHEDULED_EVENT_TYPE: &str = "booking.screening_scheduled";
/// Event type for `BookingPlaced`.
pub const BOOKING_PLACED_EVENT_TYPE: &str = "booking.booking_placed";
/// Event type for `SeatsChanged`.
pub const SEATS_CHANGED_EVENT_TYPE: &str = "booking.seats_changed";
/// Event type for `BookingConfirmed`.
pub const BOOKING_CONFIRMED_EVENT_TYPE: &str = "booking.booking_confirmed";

/// Emitted when a movie and seating grid are defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningScheduled {
    /// The screening identifier.
    pub screening_id: Uuid,
    /// Movie title.
    pub title: String,
    /// Number of rows.
    pub rows: usize,
    /// Seats in each row.
    pub seats_per_row: u16,
}

/// Emitted when tickets are booked with default placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPlaced {
    /// The screening identifier.
    pub screening_id: Uuid,
    /// The new booking's identifier.
    pub booking_id: BookingId,
    /// Assigned seats, in allocation order.
    pub seats: Vec<Seat>,
}

/// Emitted when a booking is moved to new seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatsChanged {
    /// The screening identifier.
    pub screening_id: Uuid,
    /// The booking that moved.
    pub booking_id: BookingId,
    /// Seats held before the move.
    pub previous_seats: Vec<Seat>,
    /// Seats held after the move.
    pub seats: Vec<Seat>,
}

/// Emitted when the operator accepts a booking's seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmed {
    /// The screening identifier.
    pub screening_id: Uuid,
    /// The confirmed booking.
    pub booking_id: BookingId,
    /// Number of tickets now counted against capacity.
    pub tickets: usize,
}

/// Event payload variants for the Booking context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingEventKind {
    /// A screening has been scheduled.
    ScreeningScheduled(ScreeningScheduled),
    /// A booking has been placed.
    BookingPlaced(BookingPlaced),
    /// A booking's seats have changed.
    SeatsChanged(SeatsChanged),
    /// A booking has been confirmed.
    BookingConfirmed(BookingConfirmed),
}

impl BookingEventKind {
    /// The event type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ScreeningScheduled(_) => SCREENING_SCHEDULED_EVENT_TYPE,
            Self::BookingPlaced(_) => BOOKING_PLACED_EVENT_TYPE,
            Self::SeatsChanged(_) => SEATS_CHANGED_EVENT_TYPE,
            Self::BookingConfirmed(_) => BOOKING_CONFIRMED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Booking context.
#[derive(Debug, Clone)]
pub struct BookingEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: BookingEventKind,
}

impl DomainEvent for BookingEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("BookingEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
