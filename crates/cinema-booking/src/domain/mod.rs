//! Domain model for the Booking context.

pub mod aggregates;
pub mod allocation;
pub mod commands;
pub mod config;
pub mod events;
pub mod grid;
pub mod identifier;
pub mod render;
pub mod seat;
pub mod store;
