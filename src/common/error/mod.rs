//! Unified error types.
//!
//! This module provides the crate-wide error type shared by the document
//! collaborator interface and the renderer configuration.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
