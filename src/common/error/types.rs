//! Unified error types for the renderer.
//!
//! The structural render never fails; errors only surface from the document
//! collaborator (resource loads) and from configuration parsing.
use thiserror::Error;

/// Main error type for rendering operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A resource requested from the document collaborator does not exist
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// A resource exists but could not be loaded
    #[error("Failed to load resource {id}: {reason}")]
    ResourceLoad { id: String, reason: String },

    /// Render options could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;
