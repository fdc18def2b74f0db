//! Error types for the daily score tracker
//!
//! The record store itself never fails. Errors only come out of
//! configuration and board sizing, which are checked before the store
//! is built.

use thiserror::Error;

/// Result type alias for daily-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the daily score tracker
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
