//! In-memory booking store with a seat occupancy index.

use std::collections::{BTreeMap, HashSet};

use cinema_core::error::DomainError;
use serde::Serialize;

use super::identifier::BookingId;
use super::seat::Seat;

/// Whether the operator has accepted a booking's seats yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Seats assigned, still open to reseating.
    Pending,
    /// Seats accepted; counted against capacity.
    Confirmed,
}

/// A set of seats reserved together under one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    /// The booking identifier.
    pub id: BookingId,
    /// Assigned seats, in allocation order.
    pub seats: Vec<Seat>,
    /// Confirmation status.
    pub status: BookingStatus,
}

impl Booking {
    /// Number of tickets in this booking.
    #[must_use]
    pub fn ticket_count(&self) -> usize {
        self.seats.len()
    }
}

/// All bookings of a screening, keyed by identifier.
///
/// No seat ever belongs to two bookings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingStore {
    bookings: BTreeMap<BookingId, Booking>,
    occupied: HashSet<Seat>,
}

impl BookingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the booking with the given identifier.
    #[must_use]
    pub fn get(&self, id: &BookingId) -> Option<&Booking> {
        self.bookings.get(id)
    }

    /// Whether any booking holds `seat`.
    #[must_use]
    pub fn is_booked(&self, seat: &Seat) -> bool {
        self.occupied.contains(seat)
    }

    /// Iterates over bookings in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.values()
    }

    /// Number of bookings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// Whether the store holds no bookings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Number of seats held across all bookings.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    /// Checks that `booking` could be inserted without breaking the
    /// one-booking-per-seat rule. A booking may reuse seats it already holds
    /// under the same identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CorruptedState` if any of the seats is already
    /// held by a different booking, or if the booking lists a seat twice.
    pub fn check_insert(&self, booking: &Booking) -> Result<(), DomainError> {
        let own_seats: &[Seat] = self
            .bookings
            .get(&booking.id)
            .map(|existing| existing.seats.as_slice())
            .unwrap_or_default();

        let mut incoming = HashSet::with_capacity(booking.seats.len());
        for seat in &booking.seats {
            if !incoming.insert(*seat) {
                return Err(DomainError::CorruptedState(format!(
                    "booking {} lists seat {seat} twice",
                    booking.id
                )));
            }
            if self.occupied.contains(seat) && !own_seats.contains(seat) {
                return Err(DomainError::CorruptedState(format!(
                    "seat {seat} of booking {} is already booked",
                    booking.id
                )));
            }
        }
        Ok(())
    }

    /// Inserts a booking, replacing any booking with the same identifier.
    ///
    /// # Errors
    ///
    /// Fails like [`BookingStore::check_insert`]; the store is unchanged on
    /// error.
    pub fn insert(&mut self, booking: Booking) -> Result<(), DomainError> {
        self.check_insert(&booking)?;

        if let Some(previous) = self.bookings.get(&booking.id) {
            for seat in &previous.seats {
                self.occupied.remove(seat);
            }
        }
        self.occupied.extend(booking.seats.iter().copied());
        self.bookings.insert(booking.id.clone(), booking);
        Ok(())
    }
}
