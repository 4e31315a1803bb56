//! Shared helpers for booking counter integration tests.
#![allow(dead_code)]

use std::io::Cursor;

use cinema_cli::menu::Session;
use cinema_test_support::{FixedClock, RecordingEventSink};

/// Transcript of a scripted session.
pub struct Transcript {
    /// Everything the session wrote to the terminal.
    pub output: String,
    /// Events the session published.
    pub sink: RecordingEventSink,
}

/// Runs a session that reads `lines` as operator input, one per line, and
/// returns what it printed.
pub fn run_script(lines: &[&str]) -> Transcript {
    let input = lines.iter().map(|line| format!("{line}\n")).collect::<String>();
    let sink = RecordingEventSink::new();
    let clock = FixedClock::default();
    let mut output = Vec::new();

    Session::new(Cursor::new(input), &mut output, &clock, &sink)
        .run()
        .unwrap();

    Transcript {
        output: String::from_utf8(output).unwrap(),
        sink,
    }
}
