//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from foreign
//! error types to the unified Error type.

use super::types::Error;

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            Error::Other("resource task cancelled".to_string())
        } else {
            Error::Other(format!("resource task panicked: {err}"))
        }
    }
}
