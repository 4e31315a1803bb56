//! Aggregate root for the Booking context.

use cinema_core::aggregate::AggregateRoot;
use cinema_core::clock::Clock;
use cinema_core::error::DomainError;
use cinema_core::event::EventMetadata;
use uuid::Uuid;

use super::allocation::{allocate_default, allocate_from};
use super::config::SeatingConfiguration;
use super::events::{
    BookingConfirmed, BookingEvent, BookingEventKind, BookingPlaced, ScreeningScheduled,
    SeatsChanged,
};
use super::grid::SeatGrid;
use super::identifier::{BookingId, BookingIdGenerator};
use super::seat::Seat;
use super::store::{Booking, BookingStatus, BookingStore};

/// The aggregate root for one screening: its seating grid, every booking
/// made for it, and the count of seats still available.
#[derive(Debug)]
pub struct Screening {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    config: SeatingConfiguration,
    store: BookingStore,
    ids: BookingIdGenerator,
    /// Seats not yet taken by a confirmed booking.
    available: usize,
    /// Events not yet handed to an event sink.
    uncommitted_events: Vec<BookingEvent>,
}

impl Screening {
    /// Schedules a screening, producing a `ScreeningScheduled` event.
    #[must_use]
    pub fn schedule(
        id: Uuid,
        config: SeatingConfiguration,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        let mut screening = Self {
            id,
            version: 0,
            available: config.total_seats(),
            config,
            store: BookingStore::new(),
            ids: BookingIdGenerator::default(),
            uncommitted_events: Vec::new(),
        };
        let scheduled = ScreeningScheduled {
            screening_id: id,
            title: screening.config.title().to_owned(),
            rows: screening.config.rows(),
            seats_per_row: screening.config.seats_per_row(),
        };
        screening.record(
            BookingEventKind::ScreeningScheduled(scheduled),
            correlation_id,
            clock,
        );
        screening
    }

    /// Replaces the booking id generator, e.g. to continue an existing
    /// sequence.
    #[must_use]
    pub fn with_id_generator(mut self, ids: BookingIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// The movie and grid layout.
    #[must_use]
    pub fn config(&self) -> &SeatingConfiguration {
        &self.config
    }

    /// All bookings of this screening.
    #[must_use]
    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    /// Seats not yet taken by a confirmed booking.
    #[must_use]
    pub fn available_seats(&self) -> usize {
        self.available
    }

    /// Returns the booking with the given identifier.
    #[must_use]
    pub fn booking(&self, id: &BookingId) -> Option<&Booking> {
        self.store.get(id)
    }

    /// Returns the next sequence number for a new event. Events are applied
    /// as soon as they are recorded, so the version already counts the
    /// uncommitted ones.
    fn next_sequence_number(&self) -> i64 {
        self.version + 1
    }

    fn record(&mut self, kind: BookingEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = BookingEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };

        self.apply(&event);
        self.uncommitted_events.push(event);
    }

    /// Books `tickets` seats with default placement, producing a
    /// `BookingPlaced` event. The new booking is pending until confirmed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `tickets` is zero,
    /// `DomainError::CapacityExhausted` if more tickets are requested than
    /// seats are available or the grid runs out of rows, and
    /// `DomainError::CorruptedState` if no booking id can be generated.
    /// Nothing changes on error.
    pub fn book_tickets(
        &mut self,
        tickets: usize,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<BookingId, DomainError> {
        if tickets == 0 {
            return Err(DomainError::Validation(
                "number of tickets must be at least 1".to_owned(),
            ));
        }
        if tickets > self.available {
            tracing::error!(
                requested = tickets,
                available = self.available,
                "insufficient seats available"
            );
            return Err(DomainError::CapacityExhausted {
                requested: tickets,
                available: self.available,
            });
        }

        let seats = allocate_default(&SeatGrid::new(&self.config, &self.store), tickets)
            .inspect_err(|err| tracing::error!(error = %err, "default seat allocation failed"))?;
        let mut ids = self.ids.clone();
        let booking_id = ids.generate()?;
        self.store.check_insert(&Booking {
            id: booking_id.clone(),
            seats: seats.clone(),
            status: BookingStatus::Pending,
        })?;
        self.ids = ids;

        let placed = BookingPlaced {
            screening_id: self.id,
            booking_id: booking_id.clone(),
            seats,
        };
        self.record(
            BookingEventKind::BookingPlaced(placed),
            correlation_id,
            clock,
        );
        Ok(booking_id)
    }

    /// Moves a booking so that it starts at `start`, producing a
    /// `SeatsChanged` event. The booking keeps its identifier, status and
    /// ticket count; its own current seats count as free while the new
    /// placement is chosen.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the booking does not exist,
    /// `DomainError::Validation` if `start` is outside the grid, and
    /// `DomainError::CapacityExhausted` if the grid runs out of rows. The
    /// booking keeps its seats on error.
    pub fn change_seats(
        &mut self,
        booking_id: &BookingId,
        start: Seat,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Vec<Seat>, DomainError> {
        let current = self
            .store
            .get(booking_id)
            .ok_or_else(|| DomainError::NotFound(format!("booking {booking_id}")))?;
        let previous_seats = current.seats.clone();
        let status = current.status;

        let grid = SeatGrid::excluding(&self.config, &self.store, booking_id);
        let seats = allocate_from(&grid, start, previous_seats.len()).inspect_err(|err| {
            tracing::error!(
                booking_id = %booking_id,
                start = %start,
                error = %err,
                "unable to change booking"
            );
        })?;
        self.store.check_insert(&Booking {
            id: booking_id.clone(),
            seats: seats.clone(),
            status,
        })?;

        let changed = SeatsChanged {
            screening_id: self.id,
            booking_id: booking_id.clone(),
            previous_seats,
            seats: seats.clone(),
        };
        self.record(
            BookingEventKind::SeatsChanged(changed),
            correlation_id,
            clock,
        );
        Ok(seats)
    }

    /// Accepts a booking's seats, producing a `BookingConfirmed` event and
    /// counting its tickets against the available seats.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the booking does not exist,
    /// `DomainError::Validation` if it is already confirmed, and
    /// `DomainError::CapacityExhausted` if its tickets no longer fit in the
    /// available count.
    pub fn confirm_booking(
        &mut self,
        booking_id: &BookingId,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<usize, DomainError> {
        let booking = self
            .store
            .get(booking_id)
            .ok_or_else(|| DomainError::NotFound(format!("booking {booking_id}")))?;
        if booking.status == BookingStatus::Confirmed {
            return Err(DomainError::Validation(format!(
                "booking {booking_id} is already confirmed"
            )));
        }
        let tickets = booking.ticket_count();
        if tickets > self.available {
            return Err(DomainError::CapacityExhausted {
                requested: tickets,
                available: self.available,
            });
        }

        let confirmed = BookingConfirmed {
            screening_id: self.id,
            booking_id: booking_id.clone(),
            tickets,
        };
        self.record(
            BookingEventKind::BookingConfirmed(confirmed),
            correlation_id,
            clock,
        );
        Ok(tickets)
    }

    fn put_booking(&mut self, booking: Booking) {
        // Commands validate placements before recording, so this only fails
        // if that validation and the store disagree.
        if let Err(err) = self.store.insert(booking) {
            tracing::error!(error = %err, "booking store rejected a recorded event");
        }
    }
}

impl AggregateRoot for Screening {
    type Event = BookingEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            BookingEventKind::ScreeningScheduled(_) => {}
            BookingEventKind::BookingPlaced(payload) => {
                self.put_booking(Booking {
                    id: payload.booking_id.clone(),
                    seats: payload.seats.clone(),
                    status: BookingStatus::Pending,
                });
            }
            BookingEventKind::SeatsChanged(payload) => {
                let status = self
                    .store
                    .get(&payload.booking_id)
                    .map_or(BookingStatus::Pending, |booking| booking.status);
                self.put_booking(Booking {
                    id: payload.booking_id.clone(),
                    seats: payload.seats.clone(),
                    status,
                });
            }
            BookingEventKind::BookingConfirmed(payload) => {
                if let Some(booking) = self.store.get(&payload.booking_id).cloned() {
                    self.put_booking(Booking {
                        status: BookingStatus::Confirmed,
                        ..booking
                    });
                }
                self.available = self.available.saturating_sub(payload.tickets);
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
