//! Tree preparation before splitting.
//!
//! A single depth-first pass that scopes every declared class name, links
//! each node to its parent, and pushes a table's default cell borders and
//! padding down into its cells.

use crate::common::inherit_missing;
use crate::document::{DocumentTree, NodeId, NodeKind};
use crate::render::scope::StyleScopeNamer;

/// Cell properties a table passes down to cells that do not set them.
pub const INHERITED_CELL_PROPERTIES: &[&str] = &[
    "border-left",
    "border-right",
    "border-top",
    "border-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "padding-bottom",
];

/// Prepare `tree` in place for splitting and dispatch.
pub fn prepare(tree: &mut DocumentTree, namer: &StyleScopeNamer) {
    let root = tree.root();
    let mut stack: Vec<NodeId> = vec![root];

    while let Some(id) = stack.pop() {
        let children: Vec<NodeId> = tree.children(id).to_vec();
        let table_defaults = match &tree[id].kind {
            NodeKind::Table(props) if !props.cell_style.is_empty() => {
                Some(props.cell_style.clone())
            },
            _ => None,
        };

        for &child in children.iter().rev() {
            let node = &mut tree[child];
            node.css_class = Some(namer.scoped(node.class_name.as_deref()));
            node.parent = Some(id);
            stack.push(child);
        }

        if let Some(defaults) = table_defaults {
            for &row in &children {
                let cells: Vec<NodeId> = tree.children(row).to_vec();
                for cell in cells {
                    if matches!(tree[cell].kind, NodeKind::Cell { .. }) {
                        inherit_missing(
                            &defaults,
                            &mut tree[cell].style,
                            Some(INHERITED_CELL_PROPERTIES),
                        );
                    }
                }
            }
        }
    }
}
