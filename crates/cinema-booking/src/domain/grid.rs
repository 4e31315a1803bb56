//! Read-only view of the seating grid and its occupancy.

use super::config::SeatingConfiguration;
use super::identifier::BookingId;
use super::seat::{Row, Seat};
use super::store::BookingStore;

/// Grid dimensions joined with the booking store, answering "is this seat
/// taken?".
///
/// A grid built with [`SeatGrid::excluding`] treats one booking's seats as
/// free, which is how reseating sees the hall while that booking is being
/// moved.
#[derive(Debug, Clone, Copy)]
pub struct SeatGrid<'a> {
    config: &'a SeatingConfiguration,
    store: &'a BookingStore,
    excluded: Option<&'a BookingId>,
}

impl<'a> SeatGrid<'a> {
    /// Creates a view over every booking in `store`.
    #[must_use]
    pub fn new(config: &'a SeatingConfiguration, store: &'a BookingStore) -> Self {
        Self {
            config,
            store,
            excluded: None,
        }
    }

    /// Creates a view in which the seats of `excluded` count as free.
    #[must_use]
    pub fn excluding(
        config: &'a SeatingConfiguration,
        store: &'a BookingStore,
        excluded: &'a BookingId,
    ) -> Self {
        Self {
            config,
            store,
            excluded: Some(excluded),
        }
    }

    /// Number of seats per row.
    #[must_use]
    pub fn seats_per_row(&self) -> u16 {
        self.config.seats_per_row()
    }

    /// Whether `seat` lies inside the grid.
    #[must_use]
    pub fn contains(&self, seat: &Seat) -> bool {
        self.config.contains_row(seat.row)
            && (1..=self.config.seats_per_row()).contains(&seat.number)
    }

    /// Whether `(row, number)` is held by a booking visible to this view.
    #[must_use]
    pub fn is_booked(&self, row: Row, number: u16) -> bool {
        let seat = Seat::new(row, number);
        if !self.store.is_booked(&seat) {
            return false;
        }
        match self.excluded.and_then(|id| self.store.get(id)) {
            Some(excluded) => !excluded.seats.contains(&seat),
            None => true,
        }
    }

    /// Rows from the screen backwards, bounded by the configured row count.
    pub fn row_iter(&self) -> impl DoubleEndedIterator<Item = Row> + use<> {
        self.config.row_iter()
    }
}
