//! Runtime configuration read from the environment.

use std::path::PathBuf;

use crate::error::AppError;

/// Environment variable naming the log file.
pub const LOG_FILE_VAR: &str = "GIC_LOG_FILE";

/// Environment variable holding the tracing filter.
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_LOG_FILE: &str = "cinema_bookings.log";
const DEFAULT_LOG_FILTER: &str = "info";

/// Settings for one run of the booking counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// File that structured logs are appended to. Stdout belongs to the menu.
    pub log_file: PathBuf,
    /// `tracing` filter directive, e.g. `info` or `cinema_booking=debug`.
    pub log_filter: String,
}

impl CliConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `GIC_LOG_FILE` is set but empty.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the log file variable is set but empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let log_file = match lookup(LOG_FILE_VAR) {
            Some(path) if path.trim().is_empty() => {
                return Err(AppError::Config(format!("{LOG_FILE_VAR} must not be empty")));
            }
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_LOG_FILE),
        };
        let log_filter = lookup(LOG_FILTER_VAR)
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self {
            log_file,
            log_filter,
        })
    }
}
