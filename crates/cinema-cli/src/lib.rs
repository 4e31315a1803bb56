//! GIC Cinemas interactive booking counter.
//!
//! Exposes the terminal session so integration tests can drive it with
//! scripted input.

pub mod config;
pub mod error;
pub mod input;
pub mod menu;
pub mod sink;
