//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// The referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// Not enough free seats to satisfy a request.
    #[error("insufficient seats: requested {requested}, only {available} available")]
    CapacityExhausted {
        /// Number of seats requested.
        requested: usize,
        /// Number of seats that could be provided: the remaining capacity
        /// when the request exceeds it, or the seats placed before the
        /// allocation ran out of rows.
        available: usize,
    },

    /// Internal state no longer satisfies its invariants.
    #[error("corrupted state: {0}")]
    CorruptedState(String),
}

impl DomainError {
    /// Short machine-readable code for the error kind, used in log fields.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::CapacityExhausted { .. } => "capacity_exhausted",
            Self::CorruptedState(_) => "corrupted_state",
        }
    }
}
