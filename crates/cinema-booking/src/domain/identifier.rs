//! Booking identifiers and their sequential generator.

use std::fmt;
use std::sync::LazyLock;

use cinema_core::error::DomainError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix shared by every booking identifier.
pub const BOOKING_ID_PREFIX: &str = "GIC";

/// Identifier the generator starts from; the first booking gets `GIC0001`.
pub const INITIAL_BOOKING_ID: &str = "GIC0000";

const MAX_SEQUENCE: u16 = 9999;

static BOOKING_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{BOOKING_ID_PREFIX}(\d{{4}})$")).expect("booking id pattern is valid")
});

/// Errors raised by [`BookingIdGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The last issued identifier no longer has the `GIC` + 4 digits shape.
    #[error("stored booking id {0:?} does not match GICNNNN")]
    Malformed(String),

    /// Every 4-digit sequence number has been issued.
    #[error("booking id sequence exhausted after GIC9999")]
    Exhausted,
}

impl From<IdentifierError> for DomainError {
    fn from(err: IdentifierError) -> Self {
        DomainError::CorruptedState(err.to_string())
    }
}

/// Identifier of a booking, `GIC` followed by a zero-padded 4-digit sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Wraps a raw identifier without checking its shape. Lookups with an
    /// arbitrary string simply find nothing.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The identifier as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_sequence(sequence: u16) -> Self {
        Self(format!("{BOOKING_ID_PREFIX}{sequence:04}"))
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues strictly increasing booking identifiers.
///
/// Each identifier is derived from the previous one by parsing its numeric
/// suffix, so a corrupted previous value stops generation rather than
/// restarting the sequence.
#[derive(Debug, Clone)]
pub struct BookingIdGenerator {
    last: String,
}

impl Default for BookingIdGenerator {
    fn default() -> Self {
        Self::resume_from(INITIAL_BOOKING_ID)
    }
}

impl BookingIdGenerator {
    /// Creates a generator that continues after `last`.
    #[must_use]
    pub fn resume_from(last: impl Into<String>) -> Self {
        Self { last: last.into() }
    }

    /// The most recently issued identifier (or the initial seed).
    #[must_use]
    pub fn last(&self) -> &str {
        &self.last
    }

    /// Issues the next identifier.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError::Malformed` if the stored identifier does not
    /// match `GIC\d{4}`, or `IdentifierError::Exhausted` after `GIC9999`. The
    /// stored identifier is left untouched on failure.
    pub fn generate(&mut self) -> Result<BookingId, IdentifierError> {
        let sequence = BOOKING_ID_PATTERN
            .captures(&self.last)
            .and_then(|caps| caps[1].parse::<u16>().ok())
            .ok_or_else(|| {
                tracing::error!(last = %self.last, "invalid booking id format");
                IdentifierError::Malformed(self.last.clone())
            })?;

        if sequence >= MAX_SEQUENCE {
            tracing::error!(last = %self.last, "booking id sequence exhausted");
            return Err(IdentifierError::Exhausted);
        }

        let next = BookingId::from_sequence(sequence + 1);
        self.last = next.as_str().to_owned();
        tracing::info!(booking_id = %next, "generated booking id");
        Ok(next)
    }
}
