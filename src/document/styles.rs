//! Style definitions: the document's style part as seen by the renderer.

use crate::common::StyleValues;

/// Property set of a style that applies to one element target.
///
/// A paragraph style typically carries a `p` entry for paragraph properties
/// and a `span` entry for its run properties; a table style carries entries
/// for `table`, `tr` and `td`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubStyle {
    /// Element target the values apply to (`p`, `span`, `td`, ...)
    pub target: String,
    pub values: StyleValues,
}

impl SubStyle {
    #[inline]
    pub fn new(target: impl Into<String>, values: StyleValues) -> Self {
        Self {
            target: target.into(),
            values,
        }
    }
}

/// A single style definition (`w:style`).
///
/// # Examples
///
/// ```rust
/// use docx_preview::common::style_values;
/// use docx_preview::document::{StyleDefinition, SubStyle};
///
/// let heading = StyleDefinition::new("Heading1", "p")
///     .based_on("Normal")
///     .linked("Heading1Char")
///     .with_sub_style(SubStyle::new("p", style_values([("margin-top", "12pt")])));
///
/// assert_eq!(heading.based_on.as_deref(), Some("Normal"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDefinition {
    /// Style identifier; definitions without one are not addressable
    pub id: Option<String>,
    /// UI-visible name
    pub name: Option<String>,
    /// Element target of the style itself (`p`, `span`, `table`)
    pub target: Option<String>,
    /// Style to inherit unset properties from
    pub based_on: Option<String>,
    /// Style whose rule sets are emitted alongside this one
    pub linked: Option<String>,
    /// Default style for its target
    pub is_default: bool,
    /// Paragraphs of this style start on a new page; `None` defers to the base style
    pub page_break_before: Option<bool>,
    /// Per-target property sets, in declaration order
    pub styles: Vec<SubStyle>,
}

impl StyleDefinition {
    /// Create a style with an id and element target.
    pub fn new(id: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            target: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn based_on(mut self, id: impl Into<String>) -> Self {
        self.based_on = Some(id.into());
        self
    }

    pub fn linked(mut self, id: impl Into<String>) -> Self {
        self.linked = Some(id.into());
        self
    }

    pub fn default_for_target(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn with_page_break_before(mut self, page_break_before: bool) -> Self {
        self.page_break_before = Some(page_break_before);
        self
    }

    pub fn with_sub_style(mut self, sub_style: SubStyle) -> Self {
        self.styles.push(sub_style);
        self
    }

    /// First property set declared for `target`.
    pub fn sub_style(&self, target: &str) -> Option<&SubStyle> {
        self.styles.iter().find(|s| s.target == target)
    }
}
