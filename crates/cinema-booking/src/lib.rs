//! GIC Cinemas: Booking bounded context.
//!
//! Responsible for the seating grid of a single screening, default and
//! manual seat allocation, the booking store, and seat-map rendering.

pub mod application;
pub mod domain;
