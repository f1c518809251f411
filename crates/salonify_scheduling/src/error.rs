// --- File: crates/salonify_scheduling/src/error.rs ---
use salonify_common::models::{ModelError, TimeOfDay};
use salonify_common::SalonifyError;
use thiserror::Error;

/// Errors raised while building the scheduling components from configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("Invalid business hours: {start} must be before {end}")]
    InvalidBusinessHours { start: TimeOfDay, end: TimeOfDay },
    #[error("Grid granularity must be a positive number of minutes")]
    InvalidGranularity,
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(#[from] ModelError),
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl From<SchedulingError> for SalonifyError {
    fn from(err: SchedulingError) -> Self {
        SalonifyError::ConfigError(err.to_string())
    }
}
