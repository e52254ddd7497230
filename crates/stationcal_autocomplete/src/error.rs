//! Error types for the autocomplete crate

use stationcal_common::StationcalError;
use thiserror::Error;

/// Outcome of a debounced query that produced no suggestions.
#[derive(Error, Debug)]
pub enum QueryError<E> {
    /// The suggestion source rejected the query
    #[error("Suggestion source failed: {0}")]
    Source(#[source] E),

    /// A newer query or `dispose()` cancelled this one before it fired
    #[error("Query superseded by a newer one")]
    Superseded,
}

impl<E> QueryError<E> {
    pub fn is_superseded(&self) -> bool {
        matches!(self, QueryError::Superseded)
    }
}

impl<E: std::fmt::Display> From<QueryError<E>> for StationcalError {
    fn from(err: QueryError<E>) -> Self {
        match err {
            QueryError::Source(e) => StationcalError::ExternalServiceError {
                service_name: "suggestions".to_string(),
                message: e.to_string(),
            },
            QueryError::Superseded => StationcalError::Superseded,
        }
    }
}
