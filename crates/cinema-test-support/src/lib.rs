//! Shared test doubles for the GIC Cinemas booking system.

mod clock;
mod sink;

pub use clock::{FixedClock, fixed_time};
pub use sink::RecordingEventSink;
