//! Parsed document model consumed by the renderer.
//!
//! The upstream parser turns a Word package into the types in this module:
//! a body [`DocumentTree`], the style and numbering definitions, the font
//! table and the document-level section properties. Binary parts stay behind
//! the [`DocumentResources`] collaborator and are fetched lazily.
//!
//! # Examples
//!
//! ```rust
//! use docx_preview::common::{Length, style_values};
//! use docx_preview::document::{
//!     NumberFormat, NumberingDefinition, PageSize, SectionProperties, StyleDefinition,
//!     SubStyle, WordDocument,
//! };
//!
//! let mut doc = WordDocument::new();
//! doc.styles.push(
//!     StyleDefinition::new("Normal", "p")
//!         .default_for_target()
//!         .with_sub_style(SubStyle::new("span", style_values([("font-size", "11pt")]))),
//! );
//! doc.numbering.push(
//!     NumberingDefinition::new("1", 0, NumberFormat::Decimal).with_level_text("%1."),
//! );
//! doc.default_section = Some(SectionProperties::new().with_page_size(PageSize::new(
//!     Length::from_pt(612.0),
//!     Length::from_pt(792.0),
//! )));
//!
//! let root = doc.body.root();
//! let para = doc.body.paragraph(root);
//! let run = doc.body.run(para);
//! doc.body.text(run, "Hello");
//! ```

// Submodule declarations
pub mod fonts;
pub mod node;
pub mod numbering;
pub mod resources;
pub mod section;
pub mod styles;

// Re-exports
pub use fonts::{EmbedFontRef, EmbedFontType, FontEntry};
pub use node::{
    BreakType, CommonProperties, DocumentTree, Node, NodeId, NodeKind, NumberingRef,
    ParagraphProperties, RunProperties, TabStop, TabStopAlignment, TableProperties,
    VerticalAlign,
};
pub use numbering::{NumberFormat, NumberingBullet, NumberingDefinition};
pub use resources::{DocumentResources, MemoryResources, data_url};
pub use section::{Columns, PageMargins, PageSize, SectionProperties};
pub use styles::{StyleDefinition, SubStyle};

/// A parsed Word document, ready to render.
///
/// All parts are optional in the source package; absent parts are simply
/// empty here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordDocument {
    /// Main document body
    pub body: DocumentTree,
    /// Style definitions from the styles part
    pub styles: Vec<StyleDefinition>,
    /// Numbering levels from the numbering part
    pub numbering: Vec<NumberingDefinition>,
    /// Entries of the font table part
    pub fonts: Vec<FontEntry>,
    /// Trailing section properties of the body (`w:body/w:sectPr`)
    pub default_section: Option<SectionProperties>,
}

impl WordDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }
}
