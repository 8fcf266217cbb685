//! Section properties: page setup of a document section.

use crate::common::Length;

/// Page margins for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageMargins {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl PageMargins {
    /// Create margins from the four edges, in CSS order.
    #[inline]
    pub const fn new(top: Length, right: Length, bottom: Length, left: Length) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same margin on every edge.
    #[inline]
    pub const fn uniform(length: Length) -> Self {
        Self::new(length, length, length, length)
    }
}

/// Page size for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSize {
    pub width: Length,
    pub height: Length,
}

impl PageSize {
    #[inline]
    pub const fn new(width: Length, height: Length) -> Self {
        Self { width, height }
    }
}

/// Column layout of a section (`w:cols`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Columns {
    /// Number of text columns; zero or one means a single column
    pub count: u32,
    /// Gap between columns
    pub space: Option<Length>,
    /// Draw a rule between columns
    pub separator: bool,
}

/// Page box configuration of a section (`w:sectPr`).
///
/// Attached to the paragraph that terminates a section, or supplied by the
/// document as the default for its final section.
///
/// # Examples
///
/// ```rust
/// use docx_preview::common::Length;
/// use docx_preview::document::{PageMargins, PageSize, SectionProperties};
///
/// let letter = SectionProperties::new()
///     .with_page_size(PageSize::new(Length::from_twips(12240), Length::from_twips(15840)))
///     .with_margins(PageMargins::uniform(Length::from_twips(1440)));
///
/// assert_eq!(letter.page_size.map(|s| s.width.to_css()).as_deref(), Some("612pt"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionProperties {
    pub page_size: Option<PageSize>,
    pub page_margins: Option<PageMargins>,
    pub columns: Option<Columns>,
}

impl SectionProperties {
    /// Empty properties: no margins, no explicit size, single column.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = Some(size);
        self
    }

    #[inline]
    pub fn with_margins(mut self, margins: PageMargins) -> Self {
        self.page_margins = Some(margins);
        self
    }

    #[inline]
    pub fn with_columns(mut self, columns: Columns) -> Self {
        self.columns = Some(columns);
        self
    }
}
