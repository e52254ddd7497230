// --- File: crates/stationcal_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by the stationcal crates.
///
/// Crate-specific errors convert into it with `From`, so binaries can use a
/// single error type at the top level.
#[derive(Error, Debug)]
pub enum StationcalError {
    /// Error occurred while parsing data (dates, JSON, arguments)
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error reported by an external collaborator (suggestion source, persistence)
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// A debounced request was replaced by a newer one before it fired
    #[error("Request superseded by a newer one")]
    Superseded,

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, StationcalError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, StationcalError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, StationcalError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| StationcalError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, StationcalError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| StationcalError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<serde_json::Error> for StationcalError {
    fn from(err: serde_json::Error) -> Self {
        StationcalError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for StationcalError {
    fn from(err: std::io::Error) -> Self {
        StationcalError::InternalError(err.to_string())
    }
}

impl From<stationcal_config::ConfigError> for StationcalError {
    fn from(err: stationcal_config::ConfigError) -> Self {
        StationcalError::ConfigError(err.to_string())
    }
}

// Utility functions for error handling
pub fn parse_error<T: fmt::Display>(message: T) -> StationcalError {
    StationcalError::ParseError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> StationcalError {
    StationcalError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> StationcalError {
    StationcalError::NotFoundError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> StationcalError {
    StationcalError::InternalError(message.to_string())
}
