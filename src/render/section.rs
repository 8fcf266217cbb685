//! Section and page splitting.
//!
//! The document body is a flat sequence of blocks. Section properties are
//! attached to the paragraph that *ends* a section, and explicit page breaks
//! may sit in the middle of a run. This module cuts the sequence into
//! sections, splitting paragraphs and runs where a break falls inside them,
//! and then gives every section its page properties.

use crate::document::{BreakType, DocumentTree, Node, NodeId, NodeKind, SectionProperties};
use crate::render::cascade::StyleMap;
use crate::render::config::RenderOptions;
use std::collections::HashSet;

/// A contiguous slice of top-level content sharing one page box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Resolved page properties
    pub properties: SectionProperties,
    /// Top-level nodes, in document order
    pub content: Vec<NodeId>,
}

#[derive(Debug, Default)]
struct OpenSection {
    properties: Option<SectionProperties>,
    content: Vec<NodeId>,
}

/// Position of a page break inside a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BreakPosition {
    /// Index of the child (run) holding the break
    run: usize,
    /// Index of the break marker inside that run
    marker: usize,
}

/// Partitions top-level content into sections.
#[derive(Debug, Clone)]
pub struct SectionSplitter {
    break_pages: bool,
    ignore_last_rendered_page_break: bool,
    /// Ids of paragraph styles that start on a new page
    break_before_styles: HashSet<String>,
}

impl SectionSplitter {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            break_pages: options.break_pages,
            ignore_last_rendered_page_break: options.ignore_last_rendered_page_break,
            break_before_styles: HashSet::new(),
        }
    }

    /// Also honor `page_break_before` set on the paragraphs' resolved styles.
    pub fn with_styles(mut self, styles: &StyleMap) -> Self {
        self.break_before_styles = styles
            .iter()
            .filter(|s| s.definition.page_break_before == Some(true))
            .filter_map(|s| s.definition.id.clone())
            .collect();
        self
    }

    /// Split `nodes` into sections.
    ///
    /// Paragraphs and runs cut by a page break are split into shallow copies
    /// added to `tree`; the part after the break opens the next section.
    /// Every input node ends up in exactly one section. `default` applies to
    /// the sections after the last explicit section properties.
    pub fn split(
        &self,
        tree: &mut DocumentTree,
        nodes: &[NodeId],
        default: Option<&SectionProperties>,
    ) -> Vec<Section> {
        let mut sections: Vec<OpenSection> = Vec::new();
        let mut current = OpenSection::default();

        for &node in nodes {
            let Some(paragraph) = tree[node].as_paragraph() else {
                current.content.push(node);
                continue;
            };
            let properties = paragraph.section;
            let break_before = paragraph.page_break_before || self.style_breaks_before(&tree[node]);

            if self.break_pages && break_before && !current.content.is_empty() {
                sections.push(std::mem::take(&mut current));
            }

            current.content.push(node);
            let page_break = if self.break_pages {
                self.find_page_break(tree, node)
            } else {
                None
            };
            if properties.is_none() && page_break.is_none() {
                continue;
            }

            current.properties = properties;
            sections.push(std::mem::take(&mut current));

            if let Some(position) = page_break
                && let Some(tail) = split_paragraph(tree, node, position)
            {
                current.content.push(tail);
            }
        }

        if sections.is_empty() || !current.content.is_empty() {
            sections.push(current);
        }

        let properties = backfill_properties(
            sections.iter().map(|s| s.properties).collect(),
            default.copied(),
        );
        sections
            .into_iter()
            .zip(properties)
            .map(|(section, properties)| Section {
                properties,
                content: section.content,
            })
            .collect()
    }

    fn style_breaks_before(&self, node: &Node) -> bool {
        node.class_name
            .as_deref()
            .is_some_and(|id| self.break_before_styles.contains(id))
    }

    fn is_page_break(&self, node: &Node) -> bool {
        match node.as_break() {
            Some(BreakType::Page) => true,
            Some(BreakType::LastRenderedPageBreak) => !self.ignore_last_rendered_page_break,
            _ => false,
        }
    }

    fn find_page_break(&self, tree: &DocumentTree, paragraph: NodeId) -> Option<BreakPosition> {
        tree.children(paragraph)
            .iter()
            .enumerate()
            .find_map(|(run, &child)| {
                tree.children(child)
                    .iter()
                    .position(|&c| self.is_page_break(&tree[c]))
                    .map(|marker| BreakPosition { run, marker })
            })
    }
}

/// Cut `paragraph` after the break at `position`.
///
/// The paragraph keeps everything up to and including the break marker; the
/// returned tail paragraph holds the rest. Returns `None` when nothing
/// follows the break.
fn split_paragraph(
    tree: &mut DocumentTree,
    paragraph: NodeId,
    position: BreakPosition,
) -> Option<NodeId> {
    let runs = tree.children(paragraph).to_vec();
    let break_run = runs[position.run];
    let run_children = tree.children(break_run).to_vec();
    let split_run = position.marker + 1 < run_children.len();

    if position.run + 1 >= runs.len() && !split_run {
        return None;
    }

    let mut tail_children = Vec::with_capacity(runs.len() - position.run);
    if split_run {
        let moved = &run_children[position.marker + 1..];
        let tail_run = tree.shallow_copy(break_run, moved);
        for &child in moved {
            tree[child].parent = Some(tail_run);
        }
        tree[break_run].children.truncate(position.marker + 1);
        tail_children.push(tail_run);
    }
    tail_children.extend_from_slice(&runs[position.run + 1..]);

    let tail = tree.shallow_copy(paragraph, &tail_children);
    for &child in &tail_children {
        tree[child].parent = Some(tail);
    }
    tree[paragraph].children.truncate(position.run + 1);

    // Section properties and the break belong to the head, which closed the section.
    if let NodeKind::Paragraph(props) = &mut tree[tail].kind {
        props.section = None;
        props.page_break_before = false;
    }

    Some(tail)
}

/// Give every section its page properties.
///
/// Walking backwards, a section without properties takes those of the next
/// section that has them; sections after the last explicit properties take
/// `default`, or an empty page box when the document has none.
pub(crate) fn backfill_properties(
    properties: Vec<Option<SectionProperties>>,
    default: Option<SectionProperties>,
) -> Vec<SectionProperties> {
    let mut fallback = default;
    let mut resolved: Vec<SectionProperties> = properties
        .into_iter()
        .rev()
        .map(|props| {
            if props.is_some() {
                fallback = props;
            }
            fallback.unwrap_or_default()
        })
        .collect();
    resolved.reverse();
    resolved
}
