//! Shared domain abstractions for the GIC Cinemas booking counter.
//!
//! This crate defines the fundamental traits and types that the booking
//! context depends on. It contains no I/O.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod sink;
