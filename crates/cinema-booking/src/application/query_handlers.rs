//! Query handlers for the Booking context.
//!
//! This module contains query handlers that read a screening and return
//! read-only view DTOs.

use cinema_core::error::DomainError;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::Screening;
use crate::domain::identifier::BookingId;
use crate::domain::render::MapRenderer;
use crate::domain::store::BookingStatus;

/// A rendered seating map for one booking.
#[derive(Debug, Serialize)]
pub struct SeatingMapView {
    /// The highlighted booking.
    pub booking_id: BookingId,
    /// The rendered map, one `\n`-terminated line per row.
    pub map: String,
}

/// Read-only summary of a screening.
#[derive(Debug, Serialize)]
pub struct ScreeningSummary {
    /// The screening identifier.
    pub screening_id: Uuid,
    /// Movie title.
    pub title: String,
    /// Number of rows.
    pub rows: usize,
    /// Seats in each row.
    pub seats_per_row: u16,
    /// Seats not yet taken by a confirmed booking.
    pub available_seats: usize,
    /// Number of bookings, pending or confirmed.
    pub bookings: usize,
    /// Number of confirmed bookings.
    pub confirmed_bookings: usize,
    /// Current version (event count).
    pub version: i64,
}

/// Renders the seating map with the given booking highlighted.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the booking does not exist; no map is
/// rendered in that case.
pub fn get_seating_map(
    screening: &Screening,
    booking_id: &BookingId,
    renderer: &MapRenderer,
) -> Result<SeatingMapView, DomainError> {
    let map = renderer
        .render(screening.config(), screening.store(), booking_id)
        .inspect_err(|err| {
            tracing::warn!(booking_id = %booking_id, code = err.code(), "seating map unavailable");
        })?;
    Ok(SeatingMapView {
        booking_id: booking_id.clone(),
        map,
    })
}

/// Summarises a screening's layout and occupancy.
#[must_use]
pub fn get_screening_summary(screening: &Screening) -> ScreeningSummary {
    let config = screening.config();
    let store = screening.store();
    ScreeningSummary {
        screening_id: screening.id,
        title: config.title().to_owned(),
        rows: config.rows(),
        seats_per_row: config.seats_per_row(),
        available_seats: screening.available_seats(),
        bookings: store.len(),
        confirmed_bookings: store
            .iter()
            .filter(|booking| booking.status == BookingStatus::Confirmed)
            .count(),
        version: screening.version,
    }
}

#[cfg(test)]
mod tests {
    use cinema_core::aggregate::AggregateRoot;
    use cinema_test_support::FixedClock;

    use super::*;
    use crate::domain::config::SeatingConfiguration;

    fn screening_with_booking(tickets: usize) -> (Screening, BookingId) {
        let clock = FixedClock::default();
        let config = SeatingConfiguration::new("Inception", 5, 5).unwrap();
        let mut screening = Screening::schedule(Uuid::new_v4(), config, Uuid::new_v4(), &clock);
        let booking_id = screening
            .book_tickets(tickets, Uuid::new_v4(), &clock)
            .unwrap();
        screening.clear_uncommitted_events();
        (screening, booking_id)
    }

    #[test]
    fn test_get_seating_map_renders_highlighted_booking() {
        // Arrange
        let (screening, booking_id) = screening_with_booking(2);

        // Act
        let view = get_seating_map(&screening, &booking_id, &MapRenderer::default()).unwrap();

        // Assert
        assert_eq!(view.booking_id, booking_id);
        assert!(view.map.starts_with("  S C R E E N\n"));
        assert!(view.map.contains("A .  o  o  .  .\n"));
    }

    #[test]
    fn test_get_seating_map_returns_not_found_without_rendering() {
        let (screening, _) = screening_with_booking(2);

        let result = get_seating_map(
            &screening,
            &BookingId::new("GIC0404"),
            &MapRenderer::default(),
        );

        match result {
            Err(DomainError::NotFound(msg)) => assert!(msg.contains("GIC0404")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_get_screening_summary_reports_occupancy() {
        // Arrange
        let clock = FixedClock::default();
        let (mut screening, booking_id) = screening_with_booking(3);
        screening
            .confirm_booking(&booking_id, Uuid::new_v4(), &clock)
            .unwrap();
        screening.book_tickets(1, Uuid::new_v4(), &clock).unwrap();

        // Act
        let summary = get_screening_summary(&screening);

        // Assert
        assert_eq!(summary.screening_id, screening.id);
        assert_eq!(summary.title, "Inception");
        assert_eq!(summary.rows, 5);
        assert_eq!(summary.seats_per_row, 5);
        assert_eq!(summary.available_seats, 22);
        assert_eq!(summary.bookings, 2);
        assert_eq!(summary.confirmed_bookings, 1);
        assert_eq!(summary.version, screening.version());
    }
}
