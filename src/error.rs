//! Error type shared across the optimizer.

use thiserror::Error as ThisError;

/// Errors raised while preparing or running a route optimization.
///
/// A run that finds no tour is not an error; it yields the sentinel
/// [`RouteResult::no_feasible_route`](crate::models::RouteResult::no_feasible_route).
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// Malformed or empty node, weight, or parameter input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Numeric fault inside the cost model (e.g. a non-finite edge cost).
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
