//! GIC Cinemas booking counter entry point.

use std::error::Error;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use cinema_cli::config::CliConfig;
use cinema_cli::menu::Session;
use cinema_cli::sink::TracingEventSink;
use cinema_core::clock::SystemClock;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let config = CliConfig::from_env()?;

    // Stdout belongs to the menu, so logs go to a file.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .map_err(|e| format!("cannot open log file {}: {e}", config.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();

    tracing::info!(log_file = %config.log_file.display(), "starting GIC Cinemas booking counter");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(stdin.lock(), stdout.lock(), &SystemClock, &TracingEventSink).run()?;

    Ok(())
}
