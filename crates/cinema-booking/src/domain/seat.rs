//! Seats and row letters.

use std::fmt;

use cinema_core::error::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of distinct row letters (`A` through `Z`).
pub const MAX_ROWS: usize = 26;

/// Errors converting between row indices and row letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RowError {
    /// The index does not map onto a letter.
    #[error("row index {0} is outside A-Z")]
    IndexOutOfRange(usize),

    /// The character is not an upper-case ASCII letter.
    #[error("'{0}' is not a row letter")]
    InvalidLetter(char),
}

impl From<RowError> for DomainError {
    fn from(err: RowError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

/// A seat row, stored as a zero-based index where 0 is row `A`, the row
/// nearest the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Row(u8);

impl Row {
    /// Creates a row from a zero-based index.
    ///
    /// # Errors
    ///
    /// Returns `RowError::IndexOutOfRange` if `index >= 26`.
    pub fn from_index(index: usize) -> Result<Self, RowError> {
        if index >= MAX_ROWS {
            return Err(RowError::IndexOutOfRange(index));
        }
        u8::try_from(index)
            .map(Self)
            .map_err(|_| RowError::IndexOutOfRange(index))
    }

    /// Creates a row from its letter.
    ///
    /// # Errors
    ///
    /// Returns `RowError::InvalidLetter` unless `letter` is in `A..=Z`.
    pub fn from_letter(letter: char) -> Result<Self, RowError> {
        if letter.is_ascii_uppercase() {
            Ok(Self(letter as u8 - b'A'))
        } else {
            Err(RowError::InvalidLetter(letter))
        }
    }

    /// Zero-based index of this row.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Letter of this row.
    #[must_use]
    pub fn letter(self) -> char {
        char::from(b'A' + self.0)
    }
}

impl TryFrom<char> for Row {
    type Error = RowError;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        Self::from_letter(letter)
    }
}

impl From<Row> for char {
    fn from(row: Row) -> Self {
        row.letter()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single seat, identified by row and one-based seat number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat {
    /// The row the seat is in.
    pub row: Row,
    /// One-based position within the row, counted from the left.
    pub number: u16,
}

impl Seat {
    /// Creates a seat.
    #[must_use]
    pub fn new(row: Row, number: u16) -> Self {
        Self { row, number }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.number)
    }
}
