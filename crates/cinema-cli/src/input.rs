//! Parsing of operator input lines.

use std::sync::LazyLock;

use cinema_booking::domain::config::{ROWS_RANGE, SEATS_PER_ROW_RANGE};
use cinema_booking::domain::identifier::BookingId;
use cinema_booking::domain::seat::{Row, Seat};
use regex::Regex;
use thiserror::Error;

static MOVIE_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\d+)\s+(\d+)$").expect("movie definition pattern is valid")
});

static SEAT_POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z])(\d+)$").expect("seat position pattern is valid"));

/// Rejected operator input. The display text is what the operator sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The movie line is not `[Title] [Row] [SeatsPerRow]`.
    #[error(
        "Invalid input format, Please define movie title and seating map in [Title] [Row] [SeatsPerRow] format:"
    )]
    MovieFormat,

    /// The grid dimensions are outside the supported ranges.
    #[error(
        "Invalid input, Please ensure that the number of rows is between {min_rows} and {max_rows}, the number of seats per a row is between {min_seats} and {max_seats}"
    )]
    MovieRange {
        /// Fewest rows allowed.
        min_rows: usize,
        /// Most rows allowed.
        max_rows: usize,
        /// Fewest seats per row allowed.
        min_seats: u16,
        /// Most seats per row allowed.
        max_seats: u16,
    },

    /// The ticket count is not a positive whole number.
    #[error("Invalid input, Please try again.")]
    TicketCount(String),

    /// The seat position is not a row letter followed by a seat number.
    #[error(
        "Invalid seat position format. Please enter in the format [Row][SeatNumber] (e.g., A01)."
    )]
    SeatPosition(String),
}

impl InputError {
    fn movie_range() -> Self {
        Self::MovieRange {
            min_rows: *ROWS_RANGE.start(),
            max_rows: *ROWS_RANGE.end(),
            min_seats: *SEATS_PER_ROW_RANGE.start(),
            max_seats: *SEATS_PER_ROW_RANGE.end(),
        }
    }
}

/// A movie title and seating layout as typed by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDefinition {
    /// Title as entered; the domain normalises it.
    pub title: String,
    /// Number of rows.
    pub rows: usize,
    /// Seats in each row.
    pub seats_per_row: u16,
}

/// Parses `[Title] [Row] [SeatsPerRow]`. Titles may contain spaces and
/// digits; the last two numbers are always the layout.
///
/// # Errors
///
/// Returns `InputError::MovieFormat` if the shape is wrong and
/// `InputError::MovieRange` if a dimension is out of range.
pub fn parse_movie_definition(line: &str) -> Result<MovieDefinition, InputError> {
    let caps = MOVIE_DEFINITION
        .captures(line.trim())
        .ok_or(InputError::MovieFormat)?;

    let rows = caps[2]
        .parse::<usize>()
        .ok()
        .filter(|rows| ROWS_RANGE.contains(rows));
    let seats_per_row = caps[3]
        .parse::<u16>()
        .ok()
        .filter(|seats| SEATS_PER_ROW_RANGE.contains(seats));
    let (Some(rows), Some(seats_per_row)) = (rows, seats_per_row) else {
        return Err(InputError::movie_range());
    };

    Ok(MovieDefinition {
        title: caps[1].to_owned(),
        rows,
        seats_per_row,
    })
}

/// A main menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// `[1]` book tickets.
    BookTickets,
    /// `[2]` check bookings.
    CheckBookings,
    /// `[3]` exit.
    Exit,
    /// Anything else.
    Invalid,
}

impl MenuCommand {
    /// Resolves a selection line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "1" => Self::BookTickets,
            "2" => Self::CheckBookings,
            "3" => Self::Exit,
            _ => Self::Invalid,
        }
    }
}

/// Parses a ticket count. Blank input means "back to the main menu".
///
/// # Errors
///
/// Returns `InputError::TicketCount` unless the input is blank or a positive
/// whole number.
pub fn parse_ticket_count(line: &str) -> Result<Option<usize>, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<usize>() {
        Ok(0) | Err(_) => Err(InputError::TicketCount(trimmed.to_owned())),
        Ok(tickets) => Ok(Some(tickets)),
    }
}

/// Parses a seat position such as `B03` or `c12`. Blank input means "accept
/// the current seats".
///
/// Only the shape is checked here; whether the seat exists in the hall is up
/// to the booking context.
///
/// # Errors
///
/// Returns `InputError::SeatPosition` unless the input is blank or a single
/// row letter followed by digits.
pub fn parse_seat_position(line: &str) -> Result<Option<Seat>, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let normalized = trimmed.to_ascii_uppercase();
    let invalid = || InputError::SeatPosition(trimmed.to_owned());

    let caps = SEAT_POSITION.captures(&normalized).ok_or_else(invalid)?;
    let letter = caps[1].chars().next().ok_or_else(invalid)?;
    let row = Row::from_letter(letter).map_err(|_| invalid())?;
    let number = caps[2].parse::<u16>().map_err(|_| invalid())?;
    Ok(Some(Seat::new(row, number)))
}

/// Parses a booking id. Blank input means "back to the main menu".
#[must_use]
pub fn parse_booking_id(line: &str) -> Option<BookingId> {
    let trimmed = line.trim();
    (!trimmed.is_empty()).then(|| BookingId::new(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_definition_keeps_spaces_and_digits_in_title() {
        let movie = parse_movie_definition("2001 a space odyssey 10 20").unwrap();

        assert_eq!(
            movie,
            MovieDefinition {
                title: "2001 a space odyssey".to_owned(),
                rows: 10,
                seats_per_row: 20,
            }
        );
    }

    #[test]
    fn test_movie_definition_rejects_missing_dimension() {
        assert_eq!(
            parse_movie_definition("Inception 8"),
            Err(InputError::MovieFormat)
        );
        assert_eq!(parse_movie_definition(""), Err(InputError::MovieFormat));
    }

    #[test]
    fn test_movie_definition_rejects_out_of_range_layout() {
        for line in [
            "Inception 4 10",
            "Inception 27 10",
            "Inception 8 51",
            "Inception 8 99999999",
        ] {
            let err = parse_movie_definition(line).unwrap_err();
            assert!(matches!(err, InputError::MovieRange { .. }), "{line}");
            assert!(err.to_string().contains("between 5 and 26"));
        }
    }

    #[test]
    fn test_menu_command_resolves_selections() {
        assert_eq!(MenuCommand::parse("1"), MenuCommand::BookTickets);
        assert_eq!(MenuCommand::parse(" 2 "), MenuCommand::CheckBookings);
        assert_eq!(MenuCommand::parse("3"), MenuCommand::Exit);
        assert_eq!(MenuCommand::parse("4"), MenuCommand::Invalid);
        assert_eq!(MenuCommand::parse(""), MenuCommand::Invalid);
    }

    #[test]
    fn test_ticket_count_accepts_blank_and_positive_numbers() {
        assert_eq!(parse_ticket_count(""), Ok(None));
        assert_eq!(parse_ticket_count("  "), Ok(None));
        assert_eq!(parse_ticket_count("4"), Ok(Some(4)));
    }

    #[test]
    fn test_ticket_count_rejects_zero_and_words() {
        assert!(parse_ticket_count("0").is_err());
        assert!(parse_ticket_count("four").is_err());
        assert!(parse_ticket_count("-2").is_err());
    }

    #[test]
    fn test_seat_position_parses_padded_and_lowercase_input() {
        let b = Row::from_letter('B').unwrap();
        assert_eq!(parse_seat_position("B03"), Ok(Some(Seat::new(b, 3))));
        assert_eq!(parse_seat_position("b12"), Ok(Some(Seat::new(b, 12))));
        assert_eq!(parse_seat_position(""), Ok(None));
    }

    #[test]
    fn test_seat_position_rejects_malformed_input() {
        for line in ["AB1", "1A", "A", "A-1", "A99999999"] {
            assert_eq!(
                parse_seat_position(line),
                Err(InputError::SeatPosition(line.to_owned())),
                "{line}"
            );
        }
    }

    #[test]
    fn test_booking_id_blank_means_back() {
        assert_eq!(parse_booking_id("  "), None);
        assert_eq!(
            parse_booking_id(" GIC0001 "),
            Some(BookingId::new("GIC0001"))
        );
    }
}
