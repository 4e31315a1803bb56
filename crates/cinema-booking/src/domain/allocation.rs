//! Seat allocation.
//!
//! Both algorithms fill rows from `A` (nearest the screen) backwards and
//! scan each row left to right, skipping taken seats. Whenever a new row is
//! entered the scan starts at [`centered_start`] for the tickets still to
//! place, so a group lands around the middle of the row. Neither algorithm
//! touches state: they return the seat list and the caller decides what to
//! do with it.

use cinema_core::error::DomainError;

use super::grid::SeatGrid;
use super::seat::{Row, Seat};

/// First seat number to try in a fresh row when `remaining` tickets are
/// still unplaced: `max(1, seats_per_row / 2 - remaining / 2 + 1)`.
#[must_use]
pub fn centered_start(seats_per_row: u16, remaining: usize) -> u16 {
    let half_remaining = u16::try_from(remaining / 2).unwrap_or(u16::MAX);
    (seats_per_row / 2).saturating_sub(half_remaining) + 1
}

/// Picks `tickets` free seats using the default, centered placement.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `tickets` is zero, and
/// `DomainError::CapacityExhausted` if the last row is passed before every
/// ticket is placed. Free seats to the left of a row's centered start are
/// not considered, so this can happen even when enough seats are free in
/// total.
pub fn allocate_default(grid: &SeatGrid<'_>, tickets: usize) -> Result<Vec<Seat>, DomainError> {
    if tickets == 0 {
        return Err(DomainError::Validation(
            "number of tickets must be at least 1".to_owned(),
        ));
    }

    let mut seats = Vec::with_capacity(tickets);
    for row in grid.row_iter() {
        let remaining = tickets - seats.len();
        if remaining == 0 {
            break;
        }
        let start = centered_start(grid.seats_per_row(), remaining);
        fill_row(grid, row, start, tickets, &mut seats);
    }

    finish(seats, tickets)
}

/// Picks free seats for a booking of `tickets` seats starting at `start`.
///
/// The first row is scanned from `start` to its end; every following row
/// starts at the centered offset for the tickets still unplaced.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `tickets` is zero or `start` is
/// outside the grid, and `DomainError::CapacityExhausted` if the last row is
/// passed before every ticket is placed.
pub fn allocate_from(
    grid: &SeatGrid<'_>,
    start: Seat,
    tickets: usize,
) -> Result<Vec<Seat>, DomainError> {
    if tickets == 0 {
        return Err(DomainError::Validation(
            "number of tickets must be at least 1".to_owned(),
        ));
    }
    if !grid.contains(&start) {
        return Err(DomainError::Validation(format!(
            "invalid seat number: {start}"
        )));
    }

    let mut seats = Vec::with_capacity(tickets);
    fill_row(grid, start.row, start.number, tickets, &mut seats);

    for row in grid.row_iter().skip(start.row.index() + 1) {
        let remaining = tickets - seats.len();
        if remaining == 0 {
            break;
        }
        let from = centered_start(grid.seats_per_row(), remaining);
        fill_row(grid, row, from, tickets, &mut seats);
    }

    finish(seats, tickets)
}

/// Appends free seats of `row`, from seat `from` rightwards, until `seats`
/// holds `tickets` entries or the row ends.
fn fill_row(grid: &SeatGrid<'_>, row: Row, from: u16, tickets: usize, seats: &mut Vec<Seat>) {
    for number in from..=grid.seats_per_row() {
        if seats.len() == tickets {
            return;
        }
        if !grid.is_booked(row, number) {
            seats.push(Seat::new(row, number));
        }
    }
}

fn finish(seats: Vec<Seat>, tickets: usize) -> Result<Vec<Seat>, DomainError> {
    if seats.len() < tickets {
        return Err(DomainError::CapacityExhausted {
            requested: tickets,
            available: seats.len(),
        });
    }
    Ok(seats)
}
