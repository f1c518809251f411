use crate::models::ModelError;
use crate::services::BookingServiceError;
use std::fmt;
use thiserror::Error;

/// The base error type for all Salonify errors.
///
/// Each crate can extend this by implementing From<SpecificError> for SalonifyError.
#[derive(Error, Debug)]
pub enum SalonifyError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., slot already taken)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SalonifyError {
    fn status_code(&self) -> u16 {
        match self {
            SalonifyError::HttpError(_) => 500,
            SalonifyError::ParseError(_) => 400,
            SalonifyError::ConfigError(_) => 500,
            SalonifyError::ValidationError(_) => 422,
            SalonifyError::ExternalServiceError { .. } => 502,
            SalonifyError::ConflictError(_) => 409,
            SalonifyError::NotFoundError(_) => 404,
            SalonifyError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, SalonifyError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, SalonifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, SalonifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| SalonifyError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, SalonifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| SalonifyError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for SalonifyError {
    fn from(err: reqwest::Error) -> Self {
        SalonifyError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for SalonifyError {
    fn from(err: serde_json::Error) -> Self {
        SalonifyError::ParseError(err.to_string())
    }
}

impl From<ModelError> for SalonifyError {
    fn from(err: ModelError) -> Self {
        SalonifyError::ParseError(err.to_string())
    }
}

impl From<BookingServiceError> for SalonifyError {
    fn from(err: BookingServiceError) -> Self {
        match err {
            BookingServiceError::Conflict(message) => SalonifyError::ConflictError(format!(
                "{message}. The slot was just taken, please re-select"
            )),
            BookingServiceError::NotFound(id) => {
                SalonifyError::NotFoundError(format!("booking {id}"))
            }
            err @ BookingServiceError::InvalidTransition { .. } => {
                SalonifyError::ConflictError(err.to_string())
            }
            BookingServiceError::Rejected(message) => SalonifyError::ValidationError(message),
            BookingServiceError::Transport(message) | BookingServiceError::InvalidResponse(message) => {
                external_service_error("appointment-api", message)
            }
        }
    }
}

// Utility functions for error handling
pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> SalonifyError {
    SalonifyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
