//! Command handlers for the Booking context.
//!
//! Each handler runs a command against the screening held by the caller,
//! then hands the resulting events to an [`EventSink`] and clears them from
//! the aggregate.

use cinema_core::aggregate::AggregateRoot;
use cinema_core::clock::Clock;
use cinema_core::command::Command;
use cinema_core::error::DomainError;
use cinema_core::sink::{EventRecord, EventSink};
use uuid::Uuid;

use crate::domain::aggregates::Screening;
use crate::domain::commands::{BookTickets, ChangeSeats, ConfirmBooking, ScheduleScreening};
use crate::domain::config::SeatingConfiguration;
use crate::domain::identifier::BookingId;
use crate::domain::seat::Seat;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct BookingCommandResult<T> {
    /// The aggregate ID affected by the command.
    pub aggregate_id: Uuid,
    /// What the command produced.
    pub outcome: T,
    /// The events produced and published.
    pub records: Vec<EventRecord>,
}

/// Seats assigned to a new booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedBooking {
    /// The new booking's identifier.
    pub booking_id: BookingId,
    /// Assigned seats, in allocation order.
    pub seats: Vec<Seat>,
}

fn publish_uncommitted(screening: &mut Screening, sink: &dyn EventSink) -> Vec<EventRecord> {
    let records: Vec<EventRecord> = screening
        .uncommitted_events()
        .iter()
        .map(EventRecord::from_event)
        .collect();
    sink.publish(&records);
    screening.clear_uncommitted_events();
    records
}

fn log_rejection(command: &dyn Command, err: &DomainError) {
    tracing::warn!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        code = err.code(),
        error = %err,
        "command rejected"
    );
}

/// Handles the `ScheduleScreening` command: validates the layout, creates
/// the screening, and publishes the resulting event.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the title is blank or the grid
/// dimensions are out of range.
pub fn handle_schedule_screening(
    command: &ScheduleScreening,
    clock: &dyn Clock,
    sink: &dyn EventSink,
) -> Result<BookingCommandResult<Screening>, DomainError> {
    let config = SeatingConfiguration::new(&command.title, command.rows, command.seats_per_row)
        .inspect_err(|err| log_rejection(command, err))?;

    let mut screening =
        Screening::schedule(command.screening_id, config, command.correlation_id, clock);
    let records = publish_uncommitted(&mut screening, sink);
    tracing::info!(
        screening_id = %screening.id,
        title = screening.config().title(),
        rows = screening.config().rows(),
        seats_per_row = screening.config().seats_per_row(),
        "screening scheduled"
    );

    Ok(BookingCommandResult {
        aggregate_id: command.screening_id,
        outcome: screening,
        records,
    })
}

/// Handles the `BookTickets` command: places a pending booking with default
/// seating and publishes the resulting event.
///
/// # Errors
///
/// Returns `DomainError` if the screening rejects the booking; nothing is
/// published in that case.
pub fn handle_book_tickets(
    command: &BookTickets,
    screening: &mut Screening,
    clock: &dyn Clock,
    sink: &dyn EventSink,
) -> Result<BookingCommandResult<PlacedBooking>, DomainError> {
    let booking_id = screening
        .book_tickets(command.tickets, command.correlation_id, clock)
        .inspect_err(|err| log_rejection(command, err))?;
    let seats = screening
        .booking(&booking_id)
        .map(|booking| booking.seats.clone())
        .unwrap_or_default();
    let records = publish_uncommitted(screening, sink);
    tracing::info!(
        booking_id = %booking_id,
        tickets = command.tickets,
        "booking placed"
    );

    Ok(BookingCommandResult {
        aggregate_id: screening.id,
        outcome: PlacedBooking { booking_id, seats },
        records,
    })
}

/// Handles the `ChangeSeats` command: moves the booking to start at the
/// chosen seat and publishes the resulting event.
///
/// # Errors
///
/// Returns `DomainError` if the booking is unknown or cannot be moved; the
/// booking keeps its seats and nothing is published in that case.
pub fn handle_change_seats(
    command: &ChangeSeats,
    screening: &mut Screening,
    clock: &dyn Clock,
    sink: &dyn EventSink,
) -> Result<BookingCommandResult<Vec<Seat>>, DomainError> {
    let seats = screening
        .change_seats(
            &command.booking_id,
            command.start,
            command.correlation_id,
            clock,
        )
        .inspect_err(|err| log_rejection(command, err))?;
    let records = publish_uncommitted(screening, sink);
    tracing::info!(
        booking_id = %command.booking_id,
        start = %command.start,
        "booking seats changed"
    );

    Ok(BookingCommandResult {
        aggregate_id: screening.id,
        outcome: seats,
        records,
    })
}

/// Handles the `ConfirmBooking` command: accepts the booking's seats and
/// publishes the resulting event. The outcome is the number of confirmed
/// tickets.
///
/// # Errors
///
/// Returns `DomainError` if the booking is unknown or already confirmed.
pub fn handle_confirm_booking(
    command: &ConfirmBooking,
    screening: &mut Screening,
    clock: &dyn Clock,
    sink: &dyn EventSink,
) -> Result<BookingCommandResult<usize>, DomainError> {
    let tickets = screening
        .confirm_booking(&command.booking_id, command.correlation_id, clock)
        .inspect_err(|err| log_rejection(command, err))?;
    let records = publish_uncommitted(screening, sink);
    tracing::info!(
        booking_id = %command.booking_id,
        tickets,
        available = screening.available_seats(),
        "booking confirmed"
    );

    Ok(BookingCommandResult {
        aggregate_id: screening.id,
        outcome: tickets,
        records,
    })
}

#[cfg(test)]
mod tests {
    use cinema_test_support::{FixedClock, RecordingEventSink};

    use super::*;
    use crate::domain::events::{
        BOOKING_CONFIRMED_EVENT_TYPE, BOOKING_PLACED_EVENT_TYPE, SCREENING_SCHEDULED_EVENT_TYPE,
        SEATS_CHANGED_EVENT_TYPE,
    };
    use crate::domain::seat::Row;

    fn schedule(sink: &RecordingEventSink, rows: usize, seats_per_row: u16) -> Screening {
        let command = ScheduleScreening {
            correlation_id: Uuid::new_v4(),
            screening_id: Uuid::new_v4(),
            title: "inception".to_owned(),
            rows,
            seats_per_row,
        };
        handle_schedule_screening(&command, &FixedClock::default(), sink)
            .unwrap()
            .outcome
    }

    fn book(screening: &mut Screening, sink: &RecordingEventSink, tickets: usize) -> BookingId {
        let command = BookTickets {
            correlation_id: Uuid::new_v4(),
            tickets,
        };
        handle_book_tickets(&command, screening, &FixedClock::default(), sink)
            .unwrap()
            .outcome
            .booking_id
    }

    fn seat(letter: char, number: u16) -> Seat {
        Seat::new(Row::from_letter(letter).unwrap(), number)
    }

    #[test]
    fn test_handle_schedule_screening_publishes_event() {
        // Arrange
        let sink = RecordingEventSink::new();
        let screening_id = Uuid::new_v4();
        let command = ScheduleScreening {
            correlation_id: Uuid::new_v4(),
            screening_id,
            title: "  the  matrix ".to_owned(),
            rows: 8,
            seats_per_row: 10,
        };

        // Act
        let result = handle_schedule_screening(&command, &FixedClock::default(), &sink).unwrap();

        // Assert
        assert_eq!(result.aggregate_id, screening_id);
        assert_eq!(result.outcome.config().title(), "The Matrix");
        assert_eq!(result.outcome.available_seats(), 80);
        assert!(result.outcome.uncommitted_events().is_empty());
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].event_type, SCREENING_SCHEDULED_EVENT_TYPE);
        assert_eq!(result.records[0].payload["ScreeningScheduled"]["rows"], 8);
        assert_eq!(sink.published(), result.records);
    }

    #[test]
    fn test_handle_schedule_screening_rejects_out_of_range_grid() {
        let sink = RecordingEventSink::new();
        let command = ScheduleScreening {
            correlation_id: Uuid::new_v4(),
            screening_id: Uuid::new_v4(),
            title: "Inception".to_owned(),
            rows: 27,
            seats_per_row: 10,
        };

        let result = handle_schedule_screening(&command, &FixedClock::default(), &sink);

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(sink.published().is_empty());
    }

    #[test]
    fn test_handle_book_tickets_publishes_booking_placed() {
        // Arrange
        let sink = RecordingEventSink::new();
        let mut screening = schedule(&sink, 8, 10);
        let command = BookTickets {
            correlation_id: Uuid::new_v4(),
            tickets: 4,
        };

        // Act
        let result =
            handle_book_tickets(&command, &mut screening, &FixedClock::default(), &sink).unwrap();

        // Assert
        assert_eq!(result.aggregate_id, screening.id);
        assert_eq!(result.outcome.booking_id.as_str(), "GIC0001");
        assert_eq!(
            result.outcome.seats,
            vec![seat('A', 4), seat('A', 5), seat('A', 6), seat('A', 7)]
        );
        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.event_type, BOOKING_PLACED_EVENT_TYPE);
        assert_eq!(record.sequence_number, 2);
        assert_eq!(record.correlation_id, command.correlation_id);
        assert_eq!(record.payload["BookingPlaced"]["booking_id"], "GIC0001");
        assert_eq!(
            record.payload["BookingPlaced"]["seats"][0],
            serde_json::json!({"row": "A", "number": 4})
        );
        assert_eq!(
            sink.event_types(),
            vec![SCREENING_SCHEDULED_EVENT_TYPE, BOOKING_PLACED_EVENT_TYPE]
        );
        assert!(screening.uncommitted_events().is_empty());
    }

    #[test]
    fn test_handle_book_tickets_rejection_publishes_nothing() {
        // Arrange
        let sink = RecordingEventSink::new();
        let mut screening = schedule(&sink, 5, 5);
        let command = BookTickets {
            correlation_id: Uuid::new_v4(),
            tickets: 26,
        };

        // Act
        let result = handle_book_tickets(&command, &mut screening, &FixedClock::default(), &sink);

        // Assert
        assert_eq!(
            result.unwrap_err(),
            DomainError::CapacityExhausted {
                requested: 26,
                available: 25,
            }
        );
        assert_eq!(sink.event_types(), vec![SCREENING_SCHEDULED_EVENT_TYPE]);
        assert!(screening.store().is_empty());
    }

    #[test]
    fn test_handle_change_seats_publishes_seats_changed() {
        // Arrange
        let sink = RecordingEventSink::new();
        let mut screening = schedule(&sink, 8, 10);
        let booking_id = book(&mut screening, &sink, 2);
        let command = ChangeSeats {
            correlation_id: Uuid::new_v4(),
            booking_id: booking_id.clone(),
            start: seat('C', 9),
        };

        // Act
        let result =
            handle_change_seats(&command, &mut screening, &FixedClock::default(), &sink).unwrap();

        // Assert
        assert_eq!(result.outcome, vec![seat('C', 9), seat('C', 10)]);
        assert_eq!(result.records[0].event_type, SEATS_CHANGED_EVENT_TYPE);
        assert_eq!(result.records[0].sequence_number, 3);
        assert_eq!(
            screening.booking(&booking_id).unwrap().seats,
            result.outcome
        );
    }

    #[test]
    fn test_handle_change_seats_unknown_booking_is_not_found() {
        let sink = RecordingEventSink::new();
        let mut screening = schedule(&sink, 8, 10);
        let command = ChangeSeats {
            correlation_id: Uuid::new_v4(),
            booking_id: BookingId::new("GIC0009"),
            start: seat('A', 1),
        };

        let result = handle_change_seats(&command, &mut screening, &FixedClock::default(), &sink);

        assert!(matches!(result, Err(DomainError::NotFound(_))));
        assert_eq!(sink.published().len(), 1);
    }

    #[test]
    fn test_handle_confirm_booking_counts_tickets_against_capacity() {
        // Arrange
        let sink = RecordingEventSink::new();
        let mut screening = schedule(&sink, 8, 10);
        let booking_id = book(&mut screening, &sink, 3);
        let command = ConfirmBooking {
            correlation_id: Uuid::new_v4(),
            booking_id,
        };

        // Act
        let result =
            handle_confirm_booking(&command, &mut screening, &FixedClock::default(), &sink)
                .unwrap();

        // Assert
        assert_eq!(result.outcome, 3);
        assert_eq!(screening.available_seats(), 77);
        assert_eq!(result.records[0].event_type, BOOKING_CONFIRMED_EVENT_TYPE);
        assert_eq!(screening.version(), 3);
    }
}
