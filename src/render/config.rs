//! Configuration types for rendering.
//!
//! This module defines the options that customize how a document is turned
//! into sections, elements and style text.

use crate::common::{Error, Result};
use serde::Deserialize;
use tokio::sync::Semaphore;

/// Configuration options for rendering.
///
/// # Examples
///
/// ```rust
/// use docx_preview::render::RenderOptions;
///
/// // Create with defaults
/// let options = RenderOptions::default();
/// assert!(options.break_pages);
///
/// // Or customize
/// let options = RenderOptions::new()
///     .with_class_name("preview")
///     .with_ignore_fonts(true)
///     .with_debug(true);
/// assert_eq!(options.class_name, "preview");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Namespace class applied to sections and used to scope every
    /// generated class name
    pub class_name: String,
    /// Nest all sections inside a single wrapper element
    pub in_wrapper: bool,
    /// Omit the page width from section boxes
    pub ignore_width: bool,
    /// Omit the page min-height from section boxes
    pub ignore_height: bool,
    /// Skip font-table rendering entirely
    pub ignore_fonts: bool,
    /// Split sections at explicit page breaks
    pub break_pages: bool,
    /// Do not treat Word's last-rendered page break markers as breaks
    pub ignore_last_rendered_page_break: bool,
    /// Enable experimental features (deferred tab-stop alignment)
    pub experimental: bool,
    /// Warn about unresolved style references
    pub debug: bool,
    /// Maximum number of resource loads running at once
    pub max_concurrent_loads: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            class_name: "docx".to_string(),
            in_wrapper: true,
            ignore_width: false,
            ignore_height: false,
            ignore_fonts: false,
            break_pages: true,
            ignore_last_rendered_page_break: true,
            experimental: false,
            debug: false,
            max_concurrent_loads: 8,
        }
    }
}

impl RenderOptions {
    /// Create a new `RenderOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from YAML. Missing keys keep their defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docx_preview::render::RenderOptions;
    ///
    /// let options = RenderOptions::from_yaml_str("breakPages: false\nignoreWidth: true\n")?;
    /// assert!(!options.break_pages);
    /// assert!(options.ignore_width);
    /// assert_eq!(options.class_name, "docx");
    /// # Ok::<(), docx_preview::Error>(())
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: Self =
            serde_saphyr::from_str(yaml).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check option values that cannot be expressed by the types alone.
    pub fn validate(&self) -> Result<()> {
        if self.class_name.is_empty()
            || !self
                .class_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::InvalidConfig(format!(
                "class name {:?} is not a valid CSS identifier",
                self.class_name
            )));
        }
        if !(1..=Semaphore::MAX_PERMITS).contains(&self.max_concurrent_loads) {
            return Err(Error::InvalidConfig(format!(
                "max_concurrent_loads must be between 1 and {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(())
    }

    /// Set the namespace class.
    #[inline]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set whether sections are nested inside a wrapper element.
    #[inline]
    pub fn with_wrapper(mut self, in_wrapper: bool) -> Self {
        self.in_wrapper = in_wrapper;
        self
    }

    #[inline]
    pub fn with_ignore_width(mut self, ignore: bool) -> Self {
        self.ignore_width = ignore;
        self
    }

    #[inline]
    pub fn with_ignore_height(mut self, ignore: bool) -> Self {
        self.ignore_height = ignore;
        self
    }

    #[inline]
    pub fn with_ignore_fonts(mut self, ignore: bool) -> Self {
        self.ignore_fonts = ignore;
        self
    }

    /// Set whether explicit page breaks start a new section.
    #[inline]
    pub fn with_break_pages(mut self, break_pages: bool) -> Self {
        self.break_pages = break_pages;
        self
    }

    #[inline]
    pub fn with_ignore_last_rendered_page_break(mut self, ignore: bool) -> Self {
        self.ignore_last_rendered_page_break = ignore;
        self
    }

    /// Enable experimental features such as deferred tab-stop alignment.
    #[inline]
    pub fn with_experimental(mut self, experimental: bool) -> Self {
        self.experimental = experimental;
        self
    }

    #[inline]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the size of the resource loading pool.
    #[inline]
    pub fn with_max_concurrent_loads(mut self, limit: usize) -> Self {
        self.max_concurrent_loads = limit;
        self
    }
}
