//! Commands for the Booking context.

use cinema_core::command::Command;
use uuid::Uuid;

use super::identifier::BookingId;
use super::seat::Seat;

/// Command to define the movie and seating grid of a new screening.
#[derive(Debug, Clone)]
pub struct ScheduleScreening {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The new screening's identifier.
    pub screening_id: Uuid,
    /// Movie title as entered.
    pub title: String,
    /// Number of rows.
    pub rows: usize,
    /// Seats in each row.
    pub seats_per_row: u16,
}

impl Command for ScheduleScreening {
    fn command_type(&self) -> &'static str {
        "booking.schedule_screening"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to book tickets with default seat placement.
#[derive(Debug, Clone)]
pub struct BookTickets {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Number of tickets to book.
    pub tickets: usize,
}

impl Command for BookTickets {
    fn command_type(&self) -> &'static str {
        "booking.book_tickets"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move a booking so that it starts at a chosen seat.
#[derive(Debug, Clone)]
pub struct ChangeSeats {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The booking to move.
    pub booking_id: BookingId,
    /// The first seat of the new placement.
    pub start: Seat,
}

impl Command for ChangeSeats {
    fn command_type(&self) -> &'static str {
        "booking.change_seats"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to accept a booking's current seats.
#[derive(Debug, Clone)]
pub struct ConfirmBooking {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The booking to confirm.
    pub booking_id: BookingId,
}

impl Command for ConfirmBooking {
    fn command_type(&self) -> &'static str {
        "booking.confirm"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
