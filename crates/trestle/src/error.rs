//! Error types for Trestle operations.
//!
//! This module provides the main error type [`TrestleError`] which wraps
//! the error conditions of reading, decoding and configuring diagrams.

use std::io;

use thiserror::Error;

use trestle_parser::DeserializationError;

/// The main error type for Trestle operations.
///
/// The `Deserialize` variant keeps the definition text it failed on, so
/// callers can point at the offending line.
#[derive(Debug, Error)]
pub enum TrestleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Deserialize {
        err: DeserializationError,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TrestleError {
    /// Create a new `Deserialize` error with the associated source text.
    pub fn new_deserialize_error(err: DeserializationError, src: impl Into<String>) -> Self {
        Self::Deserialize {
            err,
            src: src.into(),
        }
    }
}
