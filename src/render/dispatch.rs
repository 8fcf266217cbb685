//! Element dispatch.
//!
//! A recursive walk over the prepared document tree that turns every content
//! node into at most one output element. Dispatch is an exhaustive match on
//! [`NodeKind`]; nodes without a visual representation produce nothing.

use crate::common::StyleValues;
use crate::document::{
    BreakType, CommonProperties, DocumentTree, Node, NodeId, NodeKind, TabStop,
};
use crate::render::binder::ResourceBinder;
use crate::render::output::{ElementId, ElementTree};
use crate::render::scope::StyleScopeNamer;

/// A tab placeholder awaiting alignment against its paragraph's tab stops.
///
/// The renderer cannot measure text, so the host's layout pass resolves the
/// final width of each recorded placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredTab {
    /// The placeholder element
    pub element: ElementId,
    /// Tab stops of the enclosing paragraph, in declaration order
    pub stops: Vec<TabStop>,
}

/// Converts content nodes into output elements.
pub struct ElementDispatcher<'a> {
    tree: &'a DocumentTree,
    namer: &'a StyleScopeNamer,
    binder: &'a mut ResourceBinder,
    experimental: bool,
    output: ElementTree,
    deferred_tabs: Vec<DeferredTab>,
}

impl<'a> ElementDispatcher<'a> {
    pub fn new(
        tree: &'a DocumentTree,
        namer: &'a StyleScopeNamer,
        binder: &'a mut ResourceBinder,
        experimental: bool,
    ) -> Self {
        Self {
            tree,
            namer,
            binder,
            experimental,
            output: ElementTree::new(),
            deferred_tabs: Vec::new(),
        }
    }

    /// The output tree under construction.
    #[inline]
    pub fn output_mut(&mut self) -> &mut ElementTree {
        &mut self.output
    }

    /// Finish dispatch, returning the output tree and deferred tabs.
    pub fn finish(self) -> (ElementTree, Vec<DeferredTab>) {
        (self.output, self.deferred_tabs)
    }

    /// Render one node and its subtree.
    pub fn render(&mut self, id: NodeId) -> Option<ElementId> {
        let tree = self.tree;
        let node = tree.get(id)?;

        match &node.kind {
            NodeKind::Body => None,
            NodeKind::Paragraph(props) => {
                let el = self.create("p", node);
                self.apply_common(el, &props.common);
                if let Some(numbering) = &props.numbering {
                    let class = self.namer.numbering_class(&numbering.id, numbering.level);
                    self.push_class(el, class);
                }
                self.render_children(id, el);
                Some(el)
            },
            NodeKind::Run(props) => {
                if props.field_run || self.is_page_break_placeholder(node) {
                    return None;
                }
                let span = self.create("span", node);
                if let Some(run_id) = &props.id
                    && let Some(element) = self.output.element_mut(span)
                {
                    element.id = Some(run_id.clone());
                }
                self.apply_common(span, &props.common);
                self.render_children(id, span);

                let mut outer = span;
                if let Some(align) = props.vertical_align {
                    let wrapper = self.output.create_element(align.tag());
                    self.output.append_child(wrapper, outer);
                    outer = wrapper;
                }
                if let Some(href) = &props.href {
                    let link = self.output.create_element("a");
                    self.output.set_attribute(link, "href", href.clone());
                    self.output.append_child(link, outer);
                    outer = link;
                }
                Some(outer)
            },
            NodeKind::Hyperlink { href, anchor } => {
                let el = self.create("a", node);
                let target = match (href, anchor) {
                    (Some(href), _) => Some(href.clone()),
                    (None, Some(anchor)) => Some(format!("#{anchor}")),
                    (None, None) => None,
                };
                if let Some(target) = target {
                    self.output.set_attribute(el, "href", target);
                }
                self.render_children(id, el);
                Some(el)
            },
            NodeKind::Table(props) => {
                let el = self.create("table", node);
                if !props.column_widths.is_empty() {
                    let group = self.output.create_element("colgroup");
                    for width in &props.column_widths {
                        let col = self.output.create_element("col");
                        if let Some(element) = self.output.element_mut(col) {
                            element.style.insert("width".to_string(), width.clone());
                        }
                        self.output.append_child(group, col);
                    }
                    self.output.append_child(el, group);
                }
                self.render_children(id, el);
                Some(el)
            },
            NodeKind::Row => {
                let el = self.create("tr", node);
                self.render_children(id, el);
                Some(el)
            },
            NodeKind::Cell { span } => {
                let el = self.create("td", node);
                if let Some(span) = span {
                    let mut buffer = itoa::Buffer::new();
                    self.output.set_attribute(el, "colspan", buffer.format(*span));
                }
                self.render_children(id, el);
                Some(el)
            },
            NodeKind::Drawing => {
                let el = self.output.create_element("div");
                if let Some(element) = self.output.element_mut(el) {
                    element.style.insert("display".into(), "inline-block".into());
                    element.style.insert("position".into(), "relative".into());
                    element.style.insert("text-indent".into(), "0px".into());
                }
                self.apply_node(el, node);
                self.render_children(id, el);
                Some(el)
            },
            NodeKind::Image { src } => {
                let el = self.create("img", node);
                self.binder.request_image(src.clone(), el);
                Some(el)
            },
            NodeKind::Text(text) => Some(self.output.create_text(text.clone())),
            NodeKind::Tab => {
                let el = self.create("span", node);
                let space = self.output.create_text("\u{2003}");
                self.output.append_child(el, space);
                if self.experimental {
                    let stops = tree
                        .ancestor(id, Node::is_paragraph)
                        .and_then(|p| tree[p].as_paragraph())
                        .map(|p| p.tab_stops.clone())
                        .unwrap_or_default();
                    self.deferred_tabs.push(DeferredTab { element: el, stops });
                }
                Some(el)
            },
            NodeKind::Symbol { font, char_code } => {
                let el = self.output.create_element("span");
                if let Some(element) = self.output.element_mut(el) {
                    element.style.insert("font-family".into(), font.clone());
                }
                if let Some(c) = char::from_u32(*char_code) {
                    let text = self.output.create_text(c.to_string());
                    self.output.append_child(el, text);
                }
                Some(el)
            },
            NodeKind::Break(BreakType::TextWrapping) => Some(self.output.create_element("br")),
            NodeKind::Break(_) => None,
        }
    }

    fn render_children(&mut self, id: NodeId, parent: ElementId) {
        let tree = self.tree;
        for &child in tree.children(id) {
            if let Some(el) = self.render(child) {
                self.output.append_child(parent, el);
            }
        }
    }

    /// A run whose only content is page-type breaks.
    fn is_page_break_placeholder(&self, node: &Node) -> bool {
        !node.children.is_empty()
            && node.children.iter().all(|&c| {
                matches!(
                    self.tree[c].as_break(),
                    Some(BreakType::Page | BreakType::Column | BreakType::LastRenderedPageBreak)
                )
            })
    }

    fn create(&mut self, tag: &'static str, node: &Node) -> ElementId {
        let el = self.output.create_element(tag);
        self.apply_node(el, node);
        el
    }

    /// Scoped class and direct style declarations of `node`.
    fn apply_node(&mut self, el: ElementId, node: &Node) {
        if let Some(element) = self.output.element_mut(el) {
            if let Some(class) = &node.css_class {
                element.classes.push(class.clone());
            }
            merge_style(&mut element.style, &node.style);
        }
    }

    fn apply_common(&mut self, el: ElementId, common: &CommonProperties) {
        if let Some(element) = self.output.element_mut(el) {
            if let Some(color) = &common.color {
                element.style.insert("color".into(), color.clone());
            }
            if let Some(size) = &common.font_size {
                element.style.insert("font-size".into(), size.clone());
            }
        }
    }

    fn push_class(&mut self, el: ElementId, class: String) {
        if let Some(element) = self.output.element_mut(el) {
            element.classes.push(class);
        }
    }
}

/// Later declarations override earlier ones, as in an inline style attribute.
fn merge_style(target: &mut StyleValues, source: &StyleValues) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Length, style_values};
    use crate::document::{
        NumberingRef, ParagraphProperties, RunProperties, TabStopAlignment, TableProperties,
        VerticalAlign,
    };
    use crate::render::binder::LoadRequest;
    use crate::render::prepass::prepare;

    fn render_all(tree: &mut DocumentTree, experimental: bool) -> (String, ResourceBinder, Vec<DeferredTab>) {
        let namer = StyleScopeNamer::new("docx");
        prepare(tree, &namer);
        let mut binder = ResourceBinder::new();
        let mut dispatcher = ElementDispatcher::new(tree, &namer, &mut binder, experimental);
        let roots: Vec<_> = tree
            .top_level()
            .iter()
            .filter_map(|&n| dispatcher.render(n))
            .collect();
        let (mut output, tabs) = dispatcher.finish();
        for root in roots {
            output.push_root(root);
        }
        (output.to_html(), binder, tabs)
    }

    #[test]
    fn test_paragraph_with_numbering_and_common_props() {
        let mut tree = DocumentTree::new();
        let para = tree.append(
            tree.root(),
            NodeKind::Paragraph(ParagraphProperties {
                numbering: Some(NumberingRef {
                    id: "2".into(),
                    level: 1,
                }),
                common: CommonProperties {
                    color: Some("#FF0000".into()),
                    font_size: Some("12pt".into()),
                },
                ..Default::default()
            }),
        );
        tree[para].class_name = Some("ListParagraph".into());
        let run = tree.run(para);
        tree.text(run, "Item");

        let (html, _, _) = render_all(&mut tree, false);
        assert_eq!(
            html,
            "<p class=\"docx_listparagraph docx-num-2-1\" style=\"color: #FF0000; font-size: 12pt;\"><span class=\"docx\">Item</span></p>"
        );
    }

    #[test]
    fn test_invisible_runs_and_breaks() {
        let mut tree = DocumentTree::new();
        let para = tree.paragraph(tree.root());
        let field = tree.append(
            para,
            NodeKind::Run(RunProperties {
                field_run: true,
                ..Default::default()
            }),
        );
        tree.text(field, "PAGE \\* MERGEFORMAT");
        let page = tree.run(para);
        tree.brk(page, BreakType::Page);
        let line = tree.run(para);
        tree.text(line, "a");
        tree.brk(line, BreakType::TextWrapping);
        tree.text(line, "b");

        let (html, _, _) = render_all(&mut tree, false);
        assert_eq!(html, "<p class=\"docx\"><span class=\"docx\">a<br>b</span></p>");
    }

    #[test]
    fn test_run_wrappers() {
        let mut tree = DocumentTree::new();
        let para = tree.paragraph(tree.root());
        let run = tree.append(
            para,
            NodeKind::Run(RunProperties {
                id: Some("ref1".into()),
                vertical_align: Some(VerticalAlign::Superscript),
                href: Some("https://example.com".into()),
                ..Default::default()
            }),
        );
        tree.text(run, "1");

        let (html, _, _) = render_all(&mut tree, false);
        assert_eq!(
            html,
            "<p class=\"docx\"><a href=\"https://example.com\"><sup><span class=\"docx\" id=\"ref1\">1</span></sup></a></p>"
        );
    }

    #[test]
    fn test_hyperlink_anchor() {
        let mut tree = DocumentTree::new();
        let para = tree.paragraph(tree.root());
        let link = tree.append(
            para,
            NodeKind::Hyperlink {
                href: None,
                anchor: Some("_Toc1".into()),
            },
        );
        let run = tree.run(link);
        tree.text(run, "Intro");

        let (html, _, _) = render_all(&mut tree, false);
        assert!(html.contains("<a class=\"docx\" href=\"#_Toc1\"><span class=\"docx\">Intro</span></a>"));
    }

    #[test]
    fn test_table_structure() {
        let mut tree = DocumentTree::new();
        let table = tree.append(
            tree.root(),
            NodeKind::Table(TableProperties {
                column_widths: vec!["100pt".into(), "50pt".into()],
                cell_style: style_values([("border-left", "1px solid black")]),
            }),
        );
        let row = tree.append(table, NodeKind::Row);
        let cell = tree.append(row, NodeKind::Cell { span: Some(2) });
        tree.paragraph(cell);

        let (html, _, _) = render_all(&mut tree, false);
        assert_eq!(
            html,
            "<table class=\"docx\"><colgroup><col style=\"width: 100pt;\"><col style=\"width: 50pt;\"></colgroup><tr class=\"docx\"><td class=\"docx\" style=\"border-left: 1px solid black;\" colspan=\"2\"><p class=\"docx\"></p></td></tr></table>"
        );
    }

    #[test]
    fn test_image_requests_load() {
        let mut tree = DocumentTree::new();
        let para = tree.paragraph(tree.root());
        let run = tree.run(para);
        let drawing = tree.append(run, NodeKind::Drawing);
        let image = tree.append(drawing, NodeKind::Image { src: "rId9".into() });
        tree[image].style = style_values([("width", "20pt")]);

        let (html, binder, _) = render_all(&mut tree, false);
        assert!(html.contains(
            "<div class=\"docx\" style=\"display: inline-block; position: relative; text-indent: 0px;\"><img class=\"docx\" style=\"width: 20pt;\"></div>"
        ));
        assert!(matches!(
            binder.requests(),
            [LoadRequest::Image { src, .. }] if src == "rId9"
        ));
    }

    #[test]
    fn test_symbol_and_tab() {
        let mut tree = DocumentTree::new();
        let para = tree.paragraph(tree.root());
        let run = tree.run(para);
        tree.append(
            run,
            NodeKind::Symbol {
                font: "Wingdings".into(),
                char_code: 0xF0FC,
            },
        );
        tree.append(run, NodeKind::Tab);

        let (html, _, tabs) = render_all(&mut tree, false);
        assert!(html.contains("<span style=\"font-family: Wingdings;\">\u{F0FC}</span>"));
        assert!(html.contains("<span class=\"docx\">\u{2003}</span>"));
        assert!(tabs.is_empty());
    }

    #[test]
    fn test_experimental_tabs_record_paragraph_stops() {
        let stop = TabStop {
            position: Length::from_twips(720),
            alignment: TabStopAlignment::Right,
            leader: Some("dot".into()),
        };
        let mut tree = DocumentTree::new();
        let para = tree.append(
            tree.root(),
            NodeKind::Paragraph(ParagraphProperties {
                tab_stops: vec![stop.clone()],
                ..Default::default()
            }),
        );
        let run = tree.run(para);
        tree.append(run, NodeKind::Tab);

        let (_, _, tabs) = render_all(&mut tree, true);
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].stops, vec![stop]);
    }
}
