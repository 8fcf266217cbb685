//! Common style and formatting types.
//!
//! This module provides the length and property-map types shared by the
//! document model and the renderer.

// Submodule declarations
pub mod len;
pub mod values;

// Re-exports
pub use len::Length;
pub use values::{StyleValues, inherit_missing, style_values};
