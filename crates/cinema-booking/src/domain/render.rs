//! Text rendering of the seating map.

use cinema_core::error::DomainError;

use super::config::SeatingConfiguration;
use super::identifier::BookingId;
use super::seat::Seat;
use super::store::BookingStore;

const SCREEN_LABEL: &str = "S C R E E N";

/// Width of one seat column, glyph plus separating spaces.
const CELL_WIDTH: usize = 3;

/// Characters used for each seat state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MapGlyphs {
    empty: char,
    booked: char,
    selected: char,
}

impl Default for MapGlyphs {
    fn default() -> Self {
        Self {
            empty: '.',
            booked: 'x',
            selected: 'o',
        }
    }
}

/// Renders the hall from the screen's point of view with one booking
/// highlighted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapRenderer {
    glyphs: MapGlyphs,
}

impl MapRenderer {
    /// Renders the seating map with `booking_id`'s seats marked as selected.
    ///
    /// The screen label comes first, then rows from the back of the hall to
    /// row `A`, then the seat-number footer. Every line ends without
    /// trailing spaces and with `\n`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the booking does not exist.
    pub fn render(
        &self,
        config: &SeatingConfiguration,
        store: &BookingStore,
        booking_id: &BookingId,
    ) -> Result<String, DomainError> {
        let selected = store
            .get(booking_id)
            .ok_or_else(|| DomainError::NotFound(format!("booking {booking_id}")))?;

        let seats_per_row = usize::from(config.seats_per_row());
        // Row label plus one column per seat, without the last column's padding.
        let width = 2 + seats_per_row * CELL_WIDTH - (CELL_WIDTH - 1);

        let mut lines = Vec::with_capacity(config.rows() + 3);
        lines.push(format!("{SCREEN_LABEL:^width$}").trim_end().to_owned());
        lines.push("-".repeat(width));

        for row in config.row_iter().rev() {
            let cells: Vec<String> = (1..=config.seats_per_row())
                .map(|number| {
                    let seat = Seat::new(row, number);
                    self.glyph_for(store, &selected.seats, &seat).to_string()
                })
                .collect();
            lines.push(format!("{} {}", row.letter(), cells.join("  ")));
        }

        let footer: String = (1..=seats_per_row)
            .map(|number| format!("{number:>CELL_WIDTH$}"))
            .collect();
        lines.push(footer.trim_end().to_owned());

        let out: String = lines.iter().map(|line| format!("{line}\n")).collect();
        tracing::info!(booking_id = %booking_id, "seating map generated");
        Ok(out)
    }

    fn glyph_for(&self, store: &BookingStore, selected: &[Seat], seat: &Seat) -> char {
        if selected.contains(seat) {
            self.glyphs.selected
        } else if store.is_booked(seat) {
            self.glyphs.booked
        } else {
            self.glyphs.empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seat::Row;
    use crate::domain::store::{Booking, BookingStatus};

    fn seat(letter: char, number: u16) -> Seat {
        Seat::new(Row::from_letter(letter).unwrap(), number)
    }

    fn store_with(bookings: &[(&str, Vec<Seat>)]) -> BookingStore {
        let mut store = BookingStore::new();
        for (id, seats) in bookings {
            store
                .insert(Booking {
                    id: BookingId::new(*id),
                    seats: seats.clone(),
                    status: BookingStatus::Confirmed,
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn test_render_marks_selected_booked_and_empty_seats() {
        // Arrange
        let config = SeatingConfiguration::new("Up", 5, 5).unwrap();
        let store = store_with(&[
            ("GIC0001", vec![seat('A', 2), seat('A', 3)]),
            ("GIC0002", vec![seat('B', 5)]),
        ]);

        // Act
        let map = MapRenderer::default()
            .render(&config, &store, &BookingId::new("GIC0001"))
            .unwrap();

        // Assert
        let expected = [
            "  S C R E E N",
            "---------------",
            "E .  .  .  .  .",
            "D .  .  .  .  .",
            "C .  .  .  .  .",
            "B .  .  .  .  x",
            "A .  o  o  .  .",
            "  1  2  3  4  5",
        ]
        .map(|line| format!("{line}\n"))
        .concat();
        assert_eq!(map, expected);
    }

    #[test]
    fn test_render_highlights_queried_booking_only() {
        // Arrange
        let config = SeatingConfiguration::new("Up", 5, 5).unwrap();
        let store = store_with(&[
            ("GIC0001", vec![seat('A', 2), seat('A', 3)]),
            ("GIC0002", vec![seat('B', 5)]),
        ]);

        // Act
        let map = MapRenderer::default()
            .render(&config, &store, &BookingId::new("GIC0002"))
            .unwrap();

        // Assert
        assert!(map.contains("B .  .  .  .  o\n"));
        assert!(map.contains("A .  x  x  .  .\n"));
    }

    #[test]
    fn test_render_is_stable_without_state_change() {
        let config = SeatingConfiguration::new("Up", 8, 12).unwrap();
        let store = store_with(&[("GIC0001", vec![seat('C', 7)])]);
        let renderer = MapRenderer::default();
        let id = BookingId::new("GIC0001");

        let first = renderer.render(&config, &store, &id).unwrap();
        let second = renderer.render(&config, &store, &id).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_render_aligns_two_digit_seat_numbers() {
        let config = SeatingConfiguration::new("Up", 5, 12).unwrap();
        let store = store_with(&[("GIC0001", vec![seat('A', 12)])]);

        let map = MapRenderer::default()
            .render(&config, &store, &BookingId::new("GIC0001"))
            .unwrap();

        let lines: Vec<&str> = map.lines().collect();
        let front = lines[lines.len() - 2];
        let footer = lines[lines.len() - 1];
        assert_eq!(front.len(), footer.len());
        assert!(front.ends_with('o'));
        assert!(footer.ends_with("12"));
        assert_eq!(lines[1].len(), front.len());
    }

    #[test]
    fn test_render_reports_unknown_booking() {
        let config = SeatingConfiguration::new("Up", 5, 5).unwrap();
        let store = BookingStore::new();

        let result = MapRenderer::default().render(&config, &store, &BookingId::new("GIC0404"));

        match result {
            Err(DomainError::NotFound(msg)) => assert!(msg.contains("GIC0404")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
