//! Rendered element tree.
//!
//! Output elements live in an arena and are addressed by [`ElementId`]
//! handles, so asynchronous resource loads can patch an element (an image
//! source, for instance) without walking the tree again.

use crate::common::StyleValues;
use smallvec::SmallVec;

/// Handle of an output node inside an [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl ElementId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// An output element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    /// Inline style declarations
    pub style: StyleValues,
    /// Other attributes, in insertion order
    pub attributes: SmallVec<[(String, String); 2]>,
    pub children: Vec<ElementId>,
}

impl Element {
    /// Value of an attribute other than `id`, `class` or `style`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }
}

/// A node of the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNode {
    Element(Element),
    Text(String),
}

/// Arena of rendered output nodes with an ordered list of roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementTree {
    nodes: Vec<OutputNode>,
    roots: Vec<ElementId>,
}

const VOID_TAGS: &[&str] = &["br", "col", "hr", "img"];

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &'static str) -> ElementId {
        self.push(OutputNode::Element(Element {
            tag,
            ..Element::default()
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> ElementId {
        self.push(OutputNode::Text(text.into()))
    }

    fn push(&mut self, node: OutputNode) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` to the children of element `parent`.
    ///
    /// Text nodes cannot hold children; appending to one is ignored.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(OutputNode::Element(element)) = self.nodes.get_mut(parent.index()) {
            element.children.push(child);
        }
    }

    /// Append a top-level node.
    pub fn push_root(&mut self, id: ElementId) {
        self.roots.push(id);
    }

    /// Top-level nodes, in order.
    #[inline]
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, id: ElementId) -> Option<&OutputNode> {
        self.nodes.get(id.index())
    }

    /// Get an element (not a text node) by handle.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        match self.nodes.get(id.index()) {
            Some(OutputNode::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Get a mutable element (not a text node) by handle.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        match self.nodes.get_mut(id.index()) {
            Some(OutputNode::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Set an attribute on an element. Returns false if `id` is not an element.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.set_attribute(name, value);
                true
            },
            None => false,
        }
    }

    /// All elements with the given tag, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(element) = self.element(id) {
                if element.tag == tag {
                    found.push(id);
                }
                stack.extend(element.children.iter().rev());
            }
        }
        found
    }

    /// Concatenated text below `id`.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut text = String::new();
        self.collect_text(id, &mut text);
        text
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        match self.get(id) {
            Some(OutputNode::Text(text)) => out.push_str(text),
            Some(OutputNode::Element(element)) => {
                for &child in &element.children {
                    self.collect_text(child, out);
                }
            },
            None => {},
        }
    }

    /// Serialize the roots as HTML.
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(self.nodes.len() * 32);
        for &root in &self.roots {
            self.write_html(root, &mut html);
        }
        html
    }

    fn write_html(&self, id: ElementId, out: &mut String) {
        match self.get(id) {
            Some(OutputNode::Text(text)) => escape_into(out, text, false),
            Some(OutputNode::Element(element)) => {
                out.push('<');
                out.push_str(element.tag);
                if !element.classes.is_empty() {
                    out.push_str(" class=\"");
                    escape_into(out, &element.classes.join(" "), true);
                    out.push('"');
                }
                if let Some(element_id) = &element.id {
                    out.push_str(" id=\"");
                    escape_into(out, element_id, true);
                    out.push('"');
                }
                if !element.style.is_empty() {
                    out.push_str(" style=\"");
                    let mut first = true;
                    for (key, value) in &element.style {
                        if !first {
                            out.push(' ');
                        }
                        first = false;
                        escape_into(out, key, true);
                        out.push_str(": ");
                        escape_into(out, value, true);
                        out.push(';');
                    }
                    out.push('"');
                }
                for (name, value) in &element.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(out, value, true);
                    out.push('"');
                }
                out.push('>');

                if VOID_TAGS.contains(&element.tag) {
                    return;
                }
                for &child in &element.children {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            },
            None => {},
        }
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::style_values;

    #[test]
    fn test_html_serialization() {
        let mut tree = ElementTree::new();
        let p = tree.create_element("p");
        {
            let element = tree.element_mut(p).unwrap();
            element.classes.push("docx_normal".into());
            element.style = style_values([("color", "red")]);
        }
        let text = tree.create_text("a < b & \"c\"");
        let br = tree.create_element("br");
        tree.append_child(p, text);
        tree.append_child(p, br);
        tree.push_root(p);

        assert_eq!(
            tree.to_html(),
            "<p class=\"docx_normal\" style=\"color: red;\">a &lt; b &amp; \"c\"<br></p>"
        );
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut tree = ElementTree::new();
        let img = tree.create_element("img");
        assert!(tree.set_attribute(img, "src", "a.png"));
        assert!(tree.set_attribute(img, "src", "b.png"));
        assert_eq!(tree.element(img).unwrap().attribute("src"), Some("b.png"));

        let text = tree.create_text("x");
        assert!(!tree.set_attribute(text, "src", "c.png"));
    }

    #[test]
    fn test_find_by_tag_and_text() {
        let mut tree = ElementTree::new();
        let section = tree.create_element("section");
        let p1 = tree.create_element("p");
        let p2 = tree.create_element("p");
        let t1 = tree.create_text("one ");
        let t2 = tree.create_text("two");
        tree.append_child(p1, t1);
        tree.append_child(p2, t2);
        tree.append_child(section, p1);
        tree.append_child(section, p2);
        tree.push_root(section);

        assert_eq!(tree.find_by_tag("p"), vec![p1, p2]);
        assert_eq!(tree.text_content(section), "one two");
    }
}
