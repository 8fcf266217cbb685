//! Common types and utilities shared across the crate.
//!
//! This module provides the unified error type, length handling and the
//! ordered style-value maps used by both the document model and the renderer.

// Submodule declarations
pub mod error;
pub mod style;
pub mod unit;

// Re-exports for convenience
pub use error::{Error, Result};
pub use style::{Length, StyleValues, inherit_missing, style_values};
