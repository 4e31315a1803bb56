//! Movie title and seating layout for a screening.

use std::ops::RangeInclusive;

use cinema_core::error::DomainError;
use serde::Serialize;

use super::seat::{MAX_ROWS, Row};

/// Allowed number of rows.
pub const ROWS_RANGE: RangeInclusive<usize> = 5..=MAX_ROWS;

/// Allowed number of seats in each row.
pub const SEATS_PER_ROW_RANGE: RangeInclusive<u16> = 5..=50;

/// The movie being shown and the shape of the seating grid.
///
/// Fixed for the lifetime of a screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatingConfiguration {
    title: String,
    rows: usize,
    seats_per_row: u16,
}

impl SeatingConfiguration {
    /// Validates and creates a configuration. The title is trimmed and
    /// title-cased.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the title is blank or either
    /// dimension falls outside [`ROWS_RANGE`] / [`SEATS_PER_ROW_RANGE`].
    pub fn new(title: &str, rows: usize, seats_per_row: u16) -> Result<Self, DomainError> {
        let title = title_case(title.trim());
        if title.is_empty() {
            return Err(DomainError::Validation("movie title must not be blank".to_owned()));
        }
        if !ROWS_RANGE.contains(&rows) || !SEATS_PER_ROW_RANGE.contains(&seats_per_row) {
            return Err(DomainError::Validation(format!(
                "{rows} rows and {seats_per_row} seats per row is not within the range of \
                 {}-{} and {}-{} respectively",
                ROWS_RANGE.start(),
                ROWS_RANGE.end(),
                SEATS_PER_ROW_RANGE.start(),
                SEATS_PER_ROW_RANGE.end(),
            )));
        }
        Ok(Self {
            title,
            rows,
            seats_per_row,
        })
    }

    /// The movie title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of rows in the grid.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of seats in every row.
    #[must_use]
    pub fn seats_per_row(&self) -> u16 {
        self.seats_per_row
    }

    /// Total number of seats in the grid.
    #[must_use]
    pub fn total_seats(&self) -> usize {
        self.rows * usize::from(self.seats_per_row)
    }

    /// Rows of the grid from the screen backwards.
    pub fn row_iter(&self) -> impl DoubleEndedIterator<Item = Row> + use<> {
        // Construction guarantees rows <= 26, so every index converts.
        (0..self.rows).filter_map(|index| Row::from_index(index).ok())
    }

    /// Whether `row` exists in this grid.
    #[must_use]
    pub fn contains_row(&self, row: Row) -> bool {
        row.index() < self.rows
    }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so `"inception 2"` becomes `"Inception 2"` and `"o'NEIL"` becomes
/// `"O'Neil"`.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_title_cases_and_trims_title() {
        let config = SeatingConfiguration::new("  the dark KNIGHT ", 8, 10).unwrap();
        assert_eq!(config.title(), "The Dark Knight");
        assert_eq!(config.rows(), 8);
        assert_eq!(config.seats_per_row(), 10);
        assert_eq!(config.total_seats(), 80);
    }

    #[test]
    fn test_new_accepts_range_boundaries() {
        assert!(SeatingConfiguration::new("Up", 5, 5).is_ok());
        assert!(SeatingConfiguration::new("Up", 26, 50).is_ok());
    }

    #[test]
    fn test_new_rejects_out_of_range_dimensions() {
        for (rows, seats) in [(4, 10), (27, 10), (10, 4), (10, 51)] {
            let result = SeatingConfiguration::new("Up", rows, seats);
            match result {
                Err(DomainError::Validation(msg)) => {
                    assert!(msg.contains(&rows.to_string()));
                }
                other => panic!("expected Validation for {rows}x{seats}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_new_rejects_blank_title() {
        assert!(matches!(
            SeatingConfiguration::new("   ", 8, 10),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_title_case_restarts_after_digits_and_punctuation() {
        assert_eq!(title_case("inception 2"), "Inception 2");
        assert_eq!(title_case("o'NEIL"), "O'Neil");
        assert_eq!(title_case("2fast"), "2Fast");
    }

    #[test]
    fn test_row_iter_runs_from_a_to_last_row() {
        let config = SeatingConfiguration::new("Up", 5, 5).unwrap();
        let letters: String = config.row_iter().map(Row::letter).collect();
        assert_eq!(letters, "ABCDE");
        let reversed: String = config.row_iter().rev().map(Row::letter).collect();
        assert_eq!(reversed, "EDCBA");
    }
}
