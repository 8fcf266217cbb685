//! Asynchronous resource binding.
//!
//! Rendering is synchronous and returns as soon as the element tree and the
//! style sheet are built. Fonts, picture bullets and images referenced by the
//! document are collected as [`LoadRequest`]s while rendering, then fetched
//! from the [`DocumentResources`] collaborator on the Tokio runtime. Each
//! completed load patches the shared [`RenderedDocument`] in place:
//!
//! - fonts append an `@font-face` block to the sheet
//! - picture bullets fill the style slot reserved for them
//! - images set the `src` attribute of their element
//!
//! Failed loads are logged and leave the output untouched. Patches are
//! independent of each other and may land in any order.

use crate::common::{Error, style_values};
use crate::document::{DocumentResources, EmbedFontRef};
use crate::render::RenderedDocument;
use crate::render::output::ElementId;
use crate::render::stylesheet::{StyleSlot, push_css_escaped, rule};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// A rendered document shared with in-flight resource loads.
pub type SharedDocument = Arc<Mutex<RenderedDocument>>;

/// A resource the rendered output is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    /// Embedded font face
    Font {
        /// Family name from the font table
        family: String,
        reference: EmbedFontRef,
    },
    /// Picture bullet bound to a custom property
    NumberingImage {
        src: String,
        variable: String,
        /// Selector the custom property is declared on
        selector: String,
        slot: StyleSlot,
    },
    /// Body image awaiting its source
    Image { src: String, element: ElementId },
}

/// Collects load requests during a render and spawns them afterwards.
#[derive(Debug, Default)]
pub struct ResourceBinder {
    requests: Vec<LoadRequest>,
    fonts: HashSet<(String, Option<String>)>,
}

impl ResourceBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an embedded font face.
    ///
    /// A face is loaded once per `(id, key)` pair; returns false for a
    /// duplicate.
    pub fn request_font(&mut self, family: &str, reference: &EmbedFontRef) -> bool {
        if !self
            .fonts
            .insert((reference.id.clone(), reference.key.clone()))
        {
            return false;
        }
        self.requests.push(LoadRequest::Font {
            family: family.to_string(),
            reference: reference.clone(),
        });
        true
    }

    /// Request a picture bullet, patched into `slot` once loaded.
    pub fn request_numbering_image(
        &mut self,
        src: String,
        variable: String,
        selector: String,
        slot: StyleSlot,
    ) {
        self.requests.push(LoadRequest::NumberingImage {
            src,
            variable,
            selector,
            slot,
        });
    }

    /// Request the source of an image element.
    #[inline]
    pub fn request_image(&mut self, src: String, element: ElementId) {
        self.requests.push(LoadRequest::Image { src, element });
    }

    #[inline]
    pub fn requests(&self) -> &[LoadRequest] {
        &self.requests
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Start every collected load on the current Tokio runtime.
    ///
    /// At most `max_concurrent` loads are in flight at once; the limit is
    /// clamped to what the pool supports. Without a
    /// runtime the loads are skipped and the output keeps its placeholders.
    pub fn spawn<R: DocumentResources>(
        self,
        resources: Arc<R>,
        target: SharedDocument,
        max_concurrent: usize,
    ) -> PendingLoads {
        if self.requests.is_empty() {
            return PendingLoads::default();
        }
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                log::warn!(
                    "no async runtime available, skipping {} resource loads",
                    self.requests.len()
                );
                return PendingLoads::default();
            },
        };

        let permits = Arc::new(Semaphore::new(
            max_concurrent.clamp(1, Semaphore::MAX_PERMITS),
        ));
        let tasks = self
            .requests
            .into_iter()
            .map(|request| {
                let resources = Arc::clone(&resources);
                let target = Arc::clone(&target);
                let permits = Arc::clone(&permits);
                handle.spawn(async move {
                    let Ok(_permit) = permits.acquire_owned().await else {
                        return;
                    };
                    load(request, resources.as_ref(), &target).await;
                })
            })
            .collect();

        PendingLoads { tasks }
    }
}

/// Fetch one resource and patch the shared document.
async fn load<R: DocumentResources>(request: LoadRequest, resources: &R, target: &Mutex<RenderedDocument>) {
    match request {
        LoadRequest::Font { family, reference } => {
            match resources
                .load_font(reference.id.clone(), reference.key.clone())
                .await
            {
                Ok(url) => {
                    let css = font_face(&family, &url, &reference);
                    let mut document = target.lock();
                    document.styles.push_comment(format!("Font {family}"));
                    document.styles.push_rules(css);
                },
                Err(e) => log::debug!("font {} of {family} not loaded: {e}", reference.id),
            }
        },
        LoadRequest::NumberingImage {
            src,
            variable,
            selector,
            slot,
        } => match resources.load_numbering_image(src.clone()).await {
            Ok(url) => {
                let css = rule(&selector, &style_values([(variable, format!("url({url})"))]));
                if !target.lock().styles.fill_slot(slot, css) {
                    log::debug!("no style slot for bullet {src}");
                }
            },
            Err(e) => log::debug!("bullet image {src} not loaded: {e}"),
        },
        LoadRequest::Image { src, element } => match resources.load_document_image(src.clone()).await {
            Ok(url) => {
                if !target.lock().body.set_attribute(element, "src", url) {
                    log::debug!("image element for {src} no longer exists");
                }
            },
            Err(e) => log::debug!("image {src} not loaded: {e}"),
        },
    }
}

fn font_face(family: &str, url: &str, reference: &EmbedFontRef) -> String {
    let mut quoted = String::with_capacity(family.len() + 2);
    quoted.push('"');
    push_css_escaped(&mut quoted, family);
    quoted.push('"');
    let mut values = style_values([
        ("font-family", quoted),
        ("src", format!("url({url})")),
    ]);
    if reference.font_type.is_bold() {
        values.insert("font-weight".into(), "bold".into());
    }
    if reference.font_type.is_italic() {
        values.insert("font-style".into(), "italic".into());
    }
    rule("@font-face", &values)
}

/// Handles of the resource loads started by one render.
///
/// Dropping the value detaches the loads; they still run to completion and
/// patch the document.
#[derive(Debug, Default)]
pub struct PendingLoads {
    tasks: Vec<JoinHandle<()>>,
}

impl PendingLoads {
    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait until every load has finished and patched the document.
    pub async fn settle(self) {
        for task in self.tasks {
            if let Err(e) = task.await {
                log::warn!("{}", Error::from(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{EmbedFontType, MemoryResources};
    use crate::render::output::ElementTree;
    use crate::render::stylesheet::StyleSheet;

    fn font(id: &str, key: Option<&str>, font_type: EmbedFontType) -> EmbedFontRef {
        EmbedFontRef {
            id: id.into(),
            key: key.map(str::to_string),
            font_type,
        }
    }

    fn shared(body: ElementTree, styles: StyleSheet) -> SharedDocument {
        Arc::new(Mutex::new(RenderedDocument {
            body,
            styles,
            deferred_tabs: Vec::new(),
        }))
    }

    #[test]
    fn test_fonts_deduplicated_by_id_and_key() {
        let mut binder = ResourceBinder::new();
        assert!(binder.request_font("Calibri", &font("rId1", Some("k"), EmbedFontType::Regular)));
        assert!(!binder.request_font("Calibri", &font("rId1", Some("k"), EmbedFontType::Bold)));
        assert!(binder.request_font("Calibri", &font("rId1", None, EmbedFontType::Regular)));
        assert_eq!(binder.len(), 2);
    }

    #[test]
    fn test_font_face_variants() {
        let css = font_face("Calibri", "data:x", &font("rId2", None, EmbedFontType::BoldItalic));
        assert_eq!(
            css,
            "@font-face {\n  font-family: \"Calibri\";\n  src: url(data:x);\n  font-weight: bold;\n  font-style: italic;\n}\n"
        );
    }

    #[test]
    fn test_font_family_is_escaped() {
        let css = font_face("My \"Font\"\\", "data:x", &font("rId3", None, EmbedFontType::Regular));
        assert!(css.contains("  font-family: \"My \\\"Font\\\"\\\\\";\n"));
    }

    #[test]
    fn test_spawn_without_runtime_skips_loads() {
        let mut binder = ResourceBinder::new();
        let mut body = ElementTree::new();
        let img = body.create_element("img");
        binder.request_image("rId1".into(), img);

        let pending = binder.spawn(
            Arc::new(MemoryResources::new()),
            shared(body, StyleSheet::new()),
            4,
        );
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn test_loads_patch_document() {
        let resources = MemoryResources::new();
        resources.insert_font("rId1", "font/ttf", vec![0]);
        resources.insert_numbering_image("rId5", "image/png", vec![1]);
        resources.insert_image("rId9", "image/png", vec![2]);

        let mut body = ElementTree::new();
        let img = body.create_element("img");
        body.push_root(img);
        let mut styles = StyleSheet::new();
        let slot = styles.reserve_slot();

        let mut binder = ResourceBinder::new();
        binder.request_font("Inter", &font("rId1", None, EmbedFontType::Regular));
        binder.request_numbering_image(
            "rId5".into(),
            "--docx-rid5".into(),
            ".docx-wrapper".into(),
            slot,
        );
        binder.request_image("rId9".into(), img);

        let document = shared(body, styles);
        let pending = binder.spawn(Arc::new(resources), Arc::clone(&document), 2);
        assert_eq!(pending.len(), 3);
        pending.settle().await;

        let document = document.lock();
        let css = document.styles.to_css();
        assert!(css.starts_with(".docx-wrapper {\n  --docx-rid5: url(data:image/png;base64,AQ==);\n}\n"));
        assert!(css.contains("/* Font Inter */\n@font-face {\n  font-family: \"Inter\";\n  src: url(data:font/ttf;base64,AA==);\n}\n"));
        assert_eq!(
            document.body.to_html(),
            "<img src=\"data:image/png;base64,Ag==\">"
        );
    }

    #[tokio::test]
    async fn test_oversized_pool_is_clamped() {
        let resources = MemoryResources::new();
        resources.insert_image("rId9", "image/png", vec![2]);

        let mut body = ElementTree::new();
        let img = body.create_element("img");
        body.push_root(img);
        let mut binder = ResourceBinder::new();
        binder.request_image("rId9".into(), img);

        let document = shared(body, StyleSheet::new());
        binder
            .spawn(Arc::new(resources), Arc::clone(&document), usize::MAX)
            .settle()
            .await;

        assert_eq!(
            document.lock().body.to_html(),
            "<img src=\"data:image/png;base64,Ag==\">"
        );
    }

    #[tokio::test]
    async fn test_failed_loads_leave_output_untouched() {
        let mut body = ElementTree::new();
        let img = body.create_element("img");
        body.push_root(img);
        let mut styles = StyleSheet::new();
        styles.push_rules("p {}\n");

        let mut binder = ResourceBinder::new();
        binder.request_font("Missing", &font("rId3", None, EmbedFontType::Regular));
        binder.request_image("rId4".into(), img);

        let document = shared(body, styles);
        binder
            .spawn(Arc::new(MemoryResources::new()), Arc::clone(&document), 1)
            .settle()
            .await;

        let document = document.lock();
        assert_eq!(document.styles.to_css(), "p {}\n");
        assert_eq!(document.body.to_html(), "<img>");
    }
}
