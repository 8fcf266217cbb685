//! Document rendering.
//!
//! This module turns a parsed [`WordDocument`] into an output element tree
//! plus style-sheet text. The render pass is synchronous:
//!
//! 1. style text is generated: baseline rules, the resolved style cascade and
//!    counter-based numbering rules
//! 2. a pre-pass scopes class names, links parents and pushes table cell
//!    defaults into cells
//! 3. the body is split into sections at section ends and page breaks
//! 4. every section becomes a `section` element with a page-box style, its
//!    content dispatched node by node
//!
//! Fonts, picture bullets and images are fetched afterwards by the
//! [`ResourceBinder`], which patches the shared output as loads complete.
//!
//! # Examples
//!
//! ```rust,no_run
//! use docx_preview::document::{MemoryResources, WordDocument};
//! use docx_preview::render::{RenderOptions, render};
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let mut doc = WordDocument::new();
//! let root = doc.body.root();
//! let para = doc.body.paragraph(root);
//! let run = doc.body.run(para);
//! doc.body.text(run, "Hello");
//!
//! let output = render(&doc, Arc::new(MemoryResources::new()), &RenderOptions::default());
//! println!("{}", output.html());
//!
//! // Wait for fonts and images to be patched in
//! let rendered = output.settle().await;
//! println!("<style>{}</style>", rendered.styles.to_css());
//! # }
//! ```

// Submodule declarations
pub mod baseline;
pub mod binder;
pub mod cascade;
pub mod config;
pub mod dispatch;
pub mod numbering;
pub mod output;
pub mod prepass;
pub mod scope;
pub mod section;
pub mod stylesheet;

// Re-exports
pub use binder::{LoadRequest, PendingLoads, ResourceBinder, SharedDocument};
pub use cascade::{ResolvedStyle, StyleCascadeResolver, StyleMap};
pub use config::RenderOptions;
pub use dispatch::{DeferredTab, ElementDispatcher};
pub use numbering::{BulletImage, NumberingRuleGenerator, NumberingRules};
pub use output::{Element, ElementId, ElementTree, OutputNode};
pub use scope::StyleScopeNamer;
pub use section::{Section, SectionSplitter};
pub use stylesheet::{StyleBlock, StyleSheet, StyleSlot};

use crate::common::StyleValues;
use crate::document::{DocumentResources, SectionProperties, WordDocument};
use parking_lot::Mutex;
use std::sync::Arc;

/// Output of one render call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedDocument {
    /// Section elements, optionally nested in the wrapper
    pub body: ElementTree,
    /// Generated style sheet
    pub styles: StyleSheet,
    /// Tab placeholders awaiting alignment (experimental mode only)
    pub deferred_tabs: Vec<DeferredTab>,
}

impl RenderedDocument {
    #[inline]
    pub fn to_html(&self) -> String {
        self.body.to_html()
    }

    #[inline]
    pub fn to_css(&self) -> String {
        self.styles.to_css()
    }

    /// Serialize into a single container: a `style` element followed by the
    /// body.
    pub fn to_html_with_styles(&self) -> String {
        let css = self.styles.to_css();
        let body = self.body.to_html();
        let mut html = String::with_capacity(css.len() + body.len() + 15);
        html.push_str("<style>");
        html.push_str(&css);
        html.push_str("</style>");
        html.push_str(&body);
        html
    }
}

/// Synchronous document renderer.
#[derive(Debug, Clone)]
pub struct Renderer {
    options: RenderOptions,
    namer: StyleScopeNamer,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        let namer = StyleScopeNamer::new(options.class_name.clone());
        Self { options, namer }
    }

    #[inline]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `document`, returning the output and the resource loads it
    /// waits for.
    ///
    /// The document is not modified; the pre-pass and the section split
    /// work on a private copy of the body.
    pub fn render(&self, document: &WordDocument) -> (RenderedDocument, ResourceBinder) {
        let mut binder = ResourceBinder::new();
        let resolver = StyleCascadeResolver::new(&self.namer, self.options.debug);
        let style_map = resolver.resolve(document.styles.clone());
        let styles = self.render_styles(document, &resolver, &style_map, &mut binder);

        let mut tree = document.body.clone();
        prepass::prepare(&mut tree, &self.namer);
        let top_level = tree.top_level().to_vec();
        let sections = SectionSplitter::new(&self.options).with_styles(&style_map).split(
            &mut tree,
            &top_level,
            document.default_section.as_ref(),
        );

        let mut dispatcher =
            ElementDispatcher::new(&tree, &self.namer, &mut binder, self.options.experimental);
        let section_elements: Vec<ElementId> = sections
            .iter()
            .map(|section| self.render_section(&mut dispatcher, section))
            .collect();
        let (mut body, deferred_tabs) = dispatcher.finish();

        if self.options.in_wrapper {
            let wrapper = body.create_element("div");
            if let Some(element) = body.element_mut(wrapper) {
                element.classes.push(self.namer.wrapper_class());
            }
            for section in section_elements {
                body.append_child(wrapper, section);
            }
            body.push_root(wrapper);
        } else {
            for section in section_elements {
                body.push_root(section);
            }
        }

        log::debug!(
            "rendered {} sections with {} pending resource loads",
            sections.len(),
            binder.len()
        );

        (
            RenderedDocument {
                body,
                styles,
                deferred_tabs,
            },
            binder,
        )
    }

    /// Baseline, document style and numbering blocks, in that order.
    fn render_styles(
        &self,
        document: &WordDocument,
        resolver: &StyleCascadeResolver<'_>,
        style_map: &StyleMap,
        binder: &mut ResourceBinder,
    ) -> StyleSheet {
        let mut sheet = StyleSheet::new();
        sheet.push_comment("predefined styles");
        sheet.push_rules(baseline::baseline_css(&self.namer));

        if !style_map.is_empty() {
            sheet.push_comment("document styles");
            sheet.push_rules(resolver.render_rules(style_map));
        }

        if !document.numbering.is_empty() {
            let rules = NumberingRuleGenerator::new(&self.namer).generate(&document.numbering);
            sheet.push_comment("document numbering styles");
            sheet.push_rules(rules.css);
            let selector = format!(".{}", self.namer.wrapper_class());
            for bullet in rules.bullets {
                let slot = sheet.reserve_slot();
                binder.request_numbering_image(bullet.src, bullet.variable, selector.clone(), slot);
            }
        }

        if !self.options.ignore_fonts {
            for font in &document.fonts {
                for reference in &font.embed_refs {
                    binder.request_font(&font.name, reference);
                }
            }
        }

        sheet
    }

    fn render_section(&self, dispatcher: &mut ElementDispatcher<'_>, section: &Section) -> ElementId {
        let output = dispatcher.output_mut();
        let el = output.create_element("section");
        if let Some(element) = output.element_mut(el) {
            element.classes.push(self.namer.namespace().to_string());
            element.style = self.page_box_style(&section.properties);
        }

        for &node in &section.content {
            if let Some(child) = dispatcher.render(node) {
                dispatcher.output_mut().append_child(el, child);
            }
        }
        el
    }

    /// Box-model declarations of a section's page.
    fn page_box_style(&self, properties: &SectionProperties) -> StyleValues {
        let mut style = StyleValues::new();

        if let Some(margins) = properties.page_margins {
            style.insert("padding-left".into(), margins.left.to_css());
            style.insert("padding-right".into(), margins.right.to_css());
            style.insert("padding-top".into(), margins.top.to_css());
            style.insert("padding-bottom".into(), margins.bottom.to_css());
        }

        if let Some(size) = properties.page_size {
            if !self.options.ignore_width {
                style.insert("width".into(), size.width.to_css());
            }
            if !self.options.ignore_height {
                style.insert("min-height".into(), size.height.to_css());
            }
        }

        if let Some(columns) = properties.columns
            && columns.count > 1
        {
            let mut buffer = itoa::Buffer::new();
            style.insert("column-count".into(), buffer.format(columns.count).to_string());
            if let Some(space) = columns.space {
                style.insert("column-gap".into(), space.to_css());
            }
            if columns.separator {
                style.insert("column-rule".into(), "1px solid black".into());
            }
        }

        style
    }
}

/// Output of [`render`]: the shared document plus its pending resource loads.
#[derive(Debug)]
pub struct RenderOutput {
    document: SharedDocument,
    pending: PendingLoads,
}

impl RenderOutput {
    /// The document, shared with in-flight loads.
    #[inline]
    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    #[inline]
    pub fn pending(&self) -> &PendingLoads {
        &self.pending
    }

    /// A copy of the document as currently patched.
    pub fn snapshot(&self) -> RenderedDocument {
        self.document.lock().clone()
    }

    /// Body HTML as currently patched.
    pub fn html(&self) -> String {
        self.document.lock().to_html()
    }

    /// Style-sheet text as currently patched.
    pub fn css(&self) -> String {
        self.document.lock().to_css()
    }

    pub fn into_parts(self) -> (SharedDocument, PendingLoads) {
        (self.document, self.pending)
    }

    /// Wait for every pending load, then return the final document.
    pub async fn settle(self) -> RenderedDocument {
        self.pending.settle().await;
        self.document.lock().clone()
    }
}

/// Render `document` and start loading its resources.
///
/// Returns as soon as the structural render is done. Loads run on the
/// current Tokio runtime and patch the shared document as they complete;
/// without a runtime they are skipped.
pub fn render<R: DocumentResources>(
    document: &WordDocument,
    resources: Arc<R>,
    options: &RenderOptions,
) -> RenderOutput {
    let (rendered, binder) = Renderer::new(options.clone()).render(document);
    let shared = Arc::new(Mutex::new(rendered));
    let pending = binder.spawn(resources, Arc::clone(&shared), options.max_concurrent_loads);
    RenderOutput {
        document: shared,
        pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Length, style_values};
    use crate::document::{
        BreakType, Columns, EmbedFontType, FontEntry, MemoryResources, NodeKind, NumberFormat,
        NumberingBullet, NumberingDefinition, PageMargins, PageSize, ParagraphProperties,
        StyleDefinition, SubStyle, TableProperties,
    };

    fn page(width: f64, height: f64) -> SectionProperties {
        SectionProperties::new().with_page_size(PageSize::new(
            Length::from_pt(width),
            Length::from_pt(height),
        ))
    }

    fn sections(rendered: &RenderedDocument) -> Vec<ElementId> {
        rendered.body.find_by_tag("section")
    }

    fn section_style<'a>(rendered: &'a RenderedDocument, id: ElementId, key: &str) -> Option<&'a str> {
        rendered
            .body
            .element(id)
            .and_then(|e| e.style.get(key))
            .map(String::as_str)
    }

    #[test]
    fn test_trailing_section_uses_document_default() {
        let mut doc = WordDocument::new();
        let root = doc.body.root();
        let first = doc.body.append(
            root,
            NodeKind::Paragraph(ParagraphProperties {
                section: Some(page(600.0, 800.0)),
                ..Default::default()
            }),
        );
        let run = doc.body.run(first);
        doc.body.text(run, "one");
        let second = doc.body.paragraph(root);
        let run = doc.body.run(second);
        doc.body.text(run, "two");
        doc.default_section = Some(page(612.0, 792.0));

        let (rendered, _) = Renderer::new(RenderOptions::default()).render(&doc);
        let ids = sections(&rendered);

        assert_eq!(ids.len(), 2);
        assert_eq!(section_style(&rendered, ids[0], "width"), Some("600pt"));
        assert_eq!(section_style(&rendered, ids[0], "min-height"), Some("800pt"));
        assert_eq!(section_style(&rendered, ids[1], "width"), Some("612pt"));
        assert_eq!(section_style(&rendered, ids[1], "min-height"), Some("792pt"));
        assert_eq!(rendered.body.text_content(ids[0]), "one");
        assert_eq!(rendered.body.text_content(ids[1]), "two");
    }

    #[test]
    fn test_page_box_style() {
        let props = page(600.0, 800.0)
            .with_margins(PageMargins::new(
                Length::from_pt(72.0),
                Length::from_pt(36.0),
                Length::from_pt(72.0),
                Length::from_pt(36.0),
            ))
            .with_columns(Columns {
                count: 2,
                space: Some(Length::from_pt(18.0)),
                separator: true,
            });

        let renderer = Renderer::new(RenderOptions::default().with_ignore_height(true));
        let style = renderer.page_box_style(&props);
        let pairs: Vec<(&str, &str)> = style.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("padding-left", "36pt"),
                ("padding-right", "36pt"),
                ("padding-top", "72pt"),
                ("padding-bottom", "72pt"),
                ("width", "600pt"),
                ("column-count", "2"),
                ("column-gap", "18pt"),
                ("column-rule", "1px solid black"),
            ]
        );
    }

    #[test]
    fn test_wrapper_and_html_shape() {
        let mut doc = WordDocument::new();
        let root = doc.body.root();
        let para = doc.body.paragraph(root);
        let run = doc.body.run(para);
        doc.body.text(run, "Hi");

        let (rendered, _) = Renderer::new(RenderOptions::default()).render(&doc);
        assert_eq!(
            rendered.to_html(),
            "<div class=\"docx-wrapper\"><section class=\"docx\"><p class=\"docx\"><span class=\"docx\">Hi</span></p></section></div>"
        );

        let (bare, _) = Renderer::new(RenderOptions::default().with_wrapper(false)).render(&doc);
        assert!(bare.to_html().starts_with("<section class=\"docx\">"));
        assert!(bare.to_html_with_styles().starts_with("<style>/* predefined styles */\n"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut doc = WordDocument::new();
        doc.styles.push(
            StyleDefinition::new("Heading1", "p")
                .with_sub_style(SubStyle::new("p", style_values([("font-size", "16pt")]))),
        );
        let root = doc.body.root();
        let para = doc.body.paragraph(root);
        doc.body[para].class_name = Some("Heading1".into());
        let run = doc.body.run(para);
        doc.body.text(run, "A");
        doc.body.brk(run, BreakType::Page);
        doc.body.text(run, "B");
        let original = doc.clone();

        let renderer = Renderer::new(RenderOptions::default());
        let (first, _) = renderer.render(&doc);
        let (second, _) = renderer.render(&doc);

        assert_eq!(first, second);
        assert_eq!(doc, original);
        assert_eq!(sections(&first).len(), 2);
    }

    #[test]
    fn test_mid_run_break_moves_tail_to_next_section() {
        let mut doc = WordDocument::new();
        let root = doc.body.root();
        let para = doc.body.paragraph(root);
        let run = doc.body.run(para);
        doc.body.text(run, "before");
        doc.body.brk(run, BreakType::Page);
        doc.body.text(run, "after");

        let (rendered, _) = Renderer::new(RenderOptions::default()).render(&doc);
        let ids = sections(&rendered);
        assert_eq!(ids.len(), 2);
        assert_eq!(rendered.body.text_content(ids[0]), "before");
        assert_eq!(rendered.body.text_content(ids[1]), "after");

        let (unbroken, _) = Renderer::new(RenderOptions::default().with_break_pages(false)).render(&doc);
        assert_eq!(sections(&unbroken).len(), 1);
    }

    #[test]
    fn test_split_section_end_paragraph_keeps_two_page_boxes() {
        let mut doc = WordDocument::new();
        let root = doc.body.root();
        let para = doc.body.append(
            root,
            NodeKind::Paragraph(ParagraphProperties {
                section: Some(page(600.0, 800.0)),
                ..Default::default()
            }),
        );
        let run = doc.body.run(para);
        doc.body.text(run, "A");
        doc.body.brk(run, BreakType::Page);
        doc.body.text(run, "B");
        let next = doc.body.paragraph(root);
        let run = doc.body.run(next);
        doc.body.text(run, "C");
        doc.default_section = Some(page(100.0, 200.0));

        let (rendered, _) = Renderer::new(RenderOptions::default()).render(&doc);
        let ids = sections(&rendered);
        assert_eq!(ids.len(), 2);
        assert_eq!(section_style(&rendered, ids[0], "width"), Some("600pt"));
        assert_eq!(section_style(&rendered, ids[1], "width"), Some("100pt"));
        assert_eq!(rendered.body.text_content(ids[0]), "A");
        assert_eq!(rendered.body.text_content(ids[1]), "BC");
    }

    #[test]
    fn test_table_cells_inherit_borders() {
        let mut doc = WordDocument::new();
        let root = doc.body.root();
        let table = doc.body.append(
            root,
            NodeKind::Table(TableProperties {
                column_widths: Vec::new(),
                cell_style: style_values([("border-left", "1px solid red")]),
            }),
        );
        let row = doc.body.append(table, NodeKind::Row);
        doc.body.append(row, NodeKind::Cell { span: None });
        let own = doc.body.append(row, NodeKind::Cell { span: None });
        doc.body[own].style = style_values([("border-left", "none")]);

        let (rendered, _) = Renderer::new(RenderOptions::default()).render(&doc);
        let cells = rendered.body.find_by_tag("td");
        let border = |id: ElementId| {
            rendered
                .body
                .element(id)
                .and_then(|e| e.style.get("border-left"))
                .cloned()
        };
        assert_eq!(border(cells[0]).as_deref(), Some("1px solid red"));
        assert_eq!(border(cells[1]).as_deref(), Some("none"));
    }

    #[test]
    fn test_style_sheet_order() {
        let mut doc = WordDocument::new();
        doc.styles.push(
            StyleDefinition::new("Normal", "p")
                .default_for_target()
                .with_sub_style(SubStyle::new("p", style_values([("margin", "0")]))),
        );
        doc.numbering.push(
            NumberingDefinition::new("1", 0, NumberFormat::Decimal).with_level_text("%1."),
        );

        let (rendered, _) = Renderer::new(RenderOptions::default()).render(&doc);
        let css = rendered.to_css();
        let predefined = css.find("/* predefined styles */");
        let styles = css.find("/* document styles */");
        let numbering = css.find("/* document numbering styles */");
        assert!(predefined < styles && styles < numbering);
        assert!(css.contains(".docx p, p.docx_normal {\n  margin: 0;\n}\n"));
        assert!(css.contains(".docx-wrapper {\n  counter-reset: docx-num-1-0;\n}\n"));
    }

    #[test]
    fn test_ignore_fonts_skips_requests() {
        let mut doc = WordDocument::new();
        doc.fonts
            .push(FontEntry::new("Inter").with_embed("rId1", None, EmbedFontType::Regular));

        let (_, binder) = Renderer::new(RenderOptions::default()).render(&doc);
        assert_eq!(binder.len(), 1);
        let (_, binder) = Renderer::new(RenderOptions::default().with_ignore_fonts(true)).render(&doc);
        assert!(binder.is_empty());
    }

    #[tokio::test]
    async fn test_render_patches_resources() {
        let resources = MemoryResources::new();
        resources.insert_font("rId1", "font/ttf", vec![0]);
        resources.insert_numbering_image("rId5", "image/png", vec![1]);
        resources.insert_image("rId9", "image/png", vec![2]);

        let mut doc = WordDocument::new();
        doc.fonts
            .push(FontEntry::new("Inter").with_embed("rId1", None, EmbedFontType::Bold));
        doc.numbering.push(
            NumberingDefinition::new("3", 0, NumberFormat::Bullet)
                .with_bullet(NumberingBullet::new("rId5")),
        );
        let root = doc.body.root();
        let para = doc.body.paragraph(root);
        let run = doc.body.run(para);
        let drawing = doc.body.append(run, NodeKind::Drawing);
        doc.body.append(drawing, NodeKind::Image { src: "rId9".into() });

        let output = render(&doc, Arc::new(resources), &RenderOptions::default());
        assert_eq!(output.pending().len(), 3);
        assert!(output.html().contains("<img class=\"docx\">"));

        let rendered = output.settle().await;
        let css = rendered.to_css();
        assert!(css.contains("--docx-rid5: url(data:image/png;base64,AQ==);"));
        assert!(css.contains("/* Font Inter */\n@font-face {\n  font-family: \"Inter\";\n"));
        assert!(css.contains("font-weight: bold;"));
        assert!(
            rendered
                .to_html()
                .contains("<img class=\"docx\" src=\"data:image/png;base64,Ag==\">")
        );
    }
}
