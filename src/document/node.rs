//! Content nodes of the parsed document body.
//!
//! Nodes live in a [`DocumentTree`] arena and refer to each other through
//! [`NodeId`] handles. Children are owned top-down by the arena; the parent
//! link is a lookup-only back-edge filled in by the render pre-pass.

use crate::common::{Length, StyleValues};
use crate::document::section::SectionProperties;
use smallvec::SmallVec;

/// Handle of a node inside a [`DocumentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in its arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of break carried by a [`NodeKind::Break`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakType {
    /// Explicit page break (`w:br w:type="page"`).
    Page,
    /// Column break.
    Column,
    /// Line break inside a paragraph.
    TextWrapping,
    /// Marker left by Word where it last paginated the document.
    LastRenderedPageBreak,
}

impl BreakType {
    /// Parse the break type from its XML attribute value.
    ///
    /// A missing `w:type` attribute means a text-wrapping break.
    pub fn from_xml(s: Option<&str>) -> Self {
        match s {
            Some("page") => Self::Page,
            Some("column") => Self::Column,
            Some("lastRenderedPageBreak") => Self::LastRenderedPageBreak,
            _ => Self::TextWrapping,
        }
    }
}

/// Vertical alignment of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    Superscript,
    Subscript,
}

impl VerticalAlign {
    /// Wrapper element used to render the alignment.
    #[inline]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Superscript => "sup",
            Self::Subscript => "sub",
        }
    }
}

/// Alignment of a tab stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabStopAlignment {
    #[default]
    Left,
    Center,
    Right,
    Decimal,
    Bar,
    Clear,
}

/// A tab stop declared on a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct TabStop {
    /// Distance from the paragraph's leading edge
    pub position: Length,
    /// How text aligns against the stop
    pub alignment: TabStopAlignment,
    /// Leader character style (`dot`, `hyphen`, ...), if any
    pub leader: Option<String>,
}

/// Reference from a paragraph to a numbering level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberingRef {
    /// Numbering instance id (`w:numId`)
    pub id: String,
    /// Zero-based level (`w:ilvl`)
    pub level: u8,
}

/// Text color and size shared by paragraphs and runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonProperties {
    /// CSS color value
    pub color: Option<String>,
    /// CSS font-size value
    pub font_size: Option<String>,
}

/// Paragraph-level properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphProperties {
    /// Section properties when this paragraph terminates a section
    pub section: Option<SectionProperties>,
    /// Numbering level this paragraph belongs to
    pub numbering: Option<NumberingRef>,
    /// Declared tab stops
    pub tab_stops: Vec<TabStop>,
    /// Paragraph starts on a new page
    pub page_break_before: bool,
    pub common: CommonProperties,
}

/// Run-level properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunProperties {
    /// Element id of the run (bookmark targets)
    pub id: Option<String>,
    /// The run only carries field-code instructions and has no visible content
    pub field_run: bool,
    pub vertical_align: Option<VerticalAlign>,
    /// Link wrapping the run (e.g. produced by a HYPERLINK field)
    pub href: Option<String>,
    pub common: CommonProperties,
}

/// Table-level properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableProperties {
    /// CSS widths of the grid columns (`w:tblGrid`)
    pub column_widths: Vec<String>,
    /// Default cell styling (borders, padding) from `w:tblPr`
    pub cell_style: StyleValues,
}

/// Variant-specific payload of a content node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Root of the document body
    Body,
    Paragraph(ParagraphProperties),
    Run(RunProperties),
    Table(TableProperties),
    Row,
    Cell {
        /// Number of grid columns spanned (`w:gridSpan`)
        span: Option<u32>,
    },
    Hyperlink {
        /// External target
        href: Option<String>,
        /// Internal bookmark target
        anchor: Option<String>,
    },
    Drawing,
    Image {
        /// Relationship id of the embedded media
        src: String,
    },
    Text(String),
    Tab,
    Symbol {
        font: String,
        /// Unicode code point of the glyph
        char_code: u32,
    },
    Break(BreakType),
}

/// A single node of the document body.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node variant and its payload
    pub kind: NodeKind,
    /// Owned children, in document order
    pub children: SmallVec<[NodeId; 4]>,
    /// Class (style id) declared by the document
    pub class_name: Option<String>,
    /// Scoped class name, computed by the render pre-pass
    pub css_class: Option<String>,
    /// Non-owning back-reference, filled by the render pre-pass
    pub parent: Option<NodeId>,
    /// Direct style declarations
    pub style: StyleValues,
}

impl Node {
    /// Create a childless node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: SmallVec::new(),
            class_name: None,
            css_class: None,
            parent: None,
            style: StyleValues::new(),
        }
    }

    /// Check if this node is a paragraph.
    #[inline]
    pub fn is_paragraph(&self) -> bool {
        matches!(self.kind, NodeKind::Paragraph(_))
    }

    /// Paragraph properties, if this is a paragraph.
    #[inline]
    pub fn as_paragraph(&self) -> Option<&ParagraphProperties> {
        match &self.kind {
            NodeKind::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    /// Break type, if this is a break node.
    #[inline]
    pub fn as_break(&self) -> Option<BreakType> {
        match self.kind {
            NodeKind::Break(b) => Some(b),
            _ => None,
        }
    }
}

/// Arena holding every node of a document body.
///
/// The tree is built by the upstream parser (or by hand, see the builder
/// methods) and read by the renderer. Index 0 is always the [`NodeKind::Body`]
/// root.
///
/// # Examples
///
/// ```rust
/// use docx_preview::document::{DocumentTree, NodeKind};
///
/// let mut tree = DocumentTree::new();
/// let para = tree.paragraph(tree.root());
/// let run = tree.run(para);
/// tree.text(run, "Hello");
///
/// assert_eq!(tree.top_level().len(), 1);
/// assert!(matches!(tree[run].kind, NodeKind::Run(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    nodes: Vec<Node>,
}

impl DocumentTree {
    /// Create a tree containing only the body root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Body)],
        }
    }

    /// Handle of the body root.
    #[inline]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the arena (including the root).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the body holds no nodes besides the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Top-level content of the body, in document order.
    #[inline]
    pub fn top_level(&self) -> &[NodeId] {
        &self.nodes[0].children
    }

    /// Get a node by handle.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by handle.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Children of a node.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(node) => node.children.as_slice(),
            None => &[],
        }
    }

    /// Parent of a node, once the pre-pass has linked the tree.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Nearest ancestor (excluding `id` itself) matching `predicate`.
    pub fn ancestor(&self, id: NodeId, predicate: impl Fn(&Node) -> bool) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(candidate) = current {
            let node = &self[candidate];
            if predicate(node) {
                return Some(candidate);
            }
            current = node.parent;
        }
        None
    }

    /// Add a detached node to the arena.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Add a node of the given kind and append it to `parent`.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.add(Node::new(kind));
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Copy a node's payload, class and style into a new detached node with
    /// the given children. Children are shared handles, not deep copies.
    pub fn shallow_copy(&mut self, id: NodeId, children: &[NodeId]) -> NodeId {
        let source = &self.nodes[id.index()];
        let copy = Node {
            kind: source.kind.clone(),
            children: SmallVec::from_slice(children),
            class_name: source.class_name.clone(),
            css_class: source.css_class.clone(),
            parent: source.parent,
            style: source.style.clone(),
        };
        self.add(copy)
    }

    /// Append an empty paragraph to `parent`.
    pub fn paragraph(&mut self, parent: NodeId) -> NodeId {
        self.append(parent, NodeKind::Paragraph(ParagraphProperties::default()))
    }

    /// Append an empty run to `parent`.
    pub fn run(&mut self, parent: NodeId) -> NodeId {
        self.append(parent, NodeKind::Run(RunProperties::default()))
    }

    /// Append a text node to `parent`.
    pub fn text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.append(parent, NodeKind::Text(text.into()))
    }

    /// Append a break node to `parent`.
    pub fn brk(&mut self, parent: NodeId, kind: BreakType) -> NodeId {
        self.append(parent, NodeKind::Break(kind))
    }

    /// Iterate over all node handles in arena order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<NodeId> for DocumentTree {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl std::ops::IndexMut<NodeId> for DocumentTree {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_builds_children_in_order() {
        let mut tree = DocumentTree::new();
        let p1 = tree.paragraph(tree.root());
        let p2 = tree.paragraph(tree.root());

        assert_eq!(tree.top_level(), &[p1, p2]);
        assert!(tree[p1].is_paragraph());
        assert!(tree.parent(p1).is_none());
    }

    #[test]
    fn test_shallow_copy_shares_children() {
        let mut tree = DocumentTree::new();
        let para = tree.paragraph(tree.root());
        tree[para].class_name = Some("Heading1".into());
        let r1 = tree.run(para);
        let r2 = tree.run(para);

        let copy = tree.shallow_copy(para, &[r2]);
        assert_eq!(tree.children(copy), &[r2]);
        assert_eq!(tree.children(para), &[r1, r2]);
        assert_eq!(tree[copy].class_name.as_deref(), Some("Heading1"));
        assert!(!tree.top_level().contains(&copy));
    }

    #[test]
    fn test_ancestor_lookup() {
        let mut tree = DocumentTree::new();
        let para = tree.paragraph(tree.root());
        let run = tree.run(para);
        let tab = tree.append(run, NodeKind::Tab);
        tree[run].parent = Some(para);
        tree[tab].parent = Some(run);

        assert_eq!(tree.ancestor(tab, Node::is_paragraph), Some(para));
        assert_eq!(tree.ancestor(para, Node::is_paragraph), None);
    }

    #[test]
    fn test_break_type_from_xml() {
        assert_eq!(BreakType::from_xml(Some("page")), BreakType::Page);
        assert_eq!(BreakType::from_xml(None), BreakType::TextWrapping);
        assert_eq!(
            BreakType::from_xml(Some("lastRenderedPageBreak")),
            BreakType::LastRenderedPageBreak
        );
    }
}
