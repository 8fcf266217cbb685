//! docx-preview - Render parsed Word documents into paginated HTML and CSS
//!
//! This library converts an already-parsed word-processing document (body
//! tree, styles, numbering, font table and section properties) into an
//! output element tree plus style-sheet text that a browser-like host can
//! display and reflow.
//!
//! # Features
//!
//! - **Style cascade**: `basedOn` chains and linked styles resolved into
//!   scoped CSS rules
//! - **Numbering**: multi-level lists rendered through CSS counters
//! - **Pagination**: the body is split into page-sized sections at section
//!   ends and explicit page breaks, including breaks in the middle of a run
//! - **Async resources**: fonts, picture bullets and images are loaded in the
//!   background and patched into the output as they arrive
//!
//! # Example
//!
//! ```no_run
//! use docx_preview::document::{MemoryResources, WordDocument};
//! use docx_preview::render::{RenderOptions, render};
//! use std::sync::Arc;
//!
//! # async fn example(doc: WordDocument) -> Result<(), Box<dyn std::error::Error>> {
//! let options = RenderOptions::from_yaml_str("className: preview\nbreakPages: true\n")?;
//! let output = render(&doc, Arc::new(MemoryResources::new()), &options);
//!
//! // Provisional output, before fonts and images are loaded
//! println!("{}", output.html());
//!
//! // Final output
//! let rendered = output.settle().await;
//! println!("{}", rendered.to_html_with_styles());
//! # Ok(())
//! # }
//! ```

/// Shared types: errors, lengths and style-value maps
pub mod common;

/// Parsed document model
///
/// The typed input produced by an upstream `.docx` parser, and the
/// [`document::DocumentResources`] trait through which binary parts are
/// fetched.
pub mod document;

/// Rendering engine
///
/// Style cascade, numbering rules, section splitting, element dispatch and
/// asynchronous resource binding.
pub mod render;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use document::{DocumentResources, MemoryResources, WordDocument};
pub use render::{RenderOptions, RenderOutput, RenderedDocument, Renderer, render};
