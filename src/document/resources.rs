//! Binary resources of a document, fetched on demand.
//!
//! The renderer never reads font, image or bullet bytes itself. It asks the
//! document collaborator for a loadable reference (typically a `data:` URL)
//! and patches the rendered output once the reference arrives.

use crate::common::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::future::Future;

/// Asynchronous access to the binary parts of a parsed document.
///
/// Every method resolves to a URL the host can load directly, or fails; the
/// renderer tolerates failures silently. Implementations may cache repeated
/// requests for the same resource.
pub trait DocumentResources: Send + Sync + 'static {
    /// Load an embedded font by relationship id, de-obfuscating with `key`.
    fn load_font(
        &self,
        id: String,
        key: Option<String>,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Load a picture-bullet image from the numbering part.
    fn load_numbering_image(&self, src: String) -> impl Future<Output = Result<String>> + Send;

    /// Load an image embedded in the document body.
    fn load_document_image(&self, src: String) -> impl Future<Output = Result<String>> + Send;
}

/// Encode bytes as a base64 `data:` URL.
///
/// # Examples
///
/// ```rust
/// use docx_preview::document::data_url;
///
/// assert_eq!(data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
/// ```
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    let mut url = String::with_capacity(13 + mime.len() + encoded.len());
    url.push_str("data:");
    url.push_str(mime);
    url.push_str(";base64,");
    url.push_str(&encoded);
    url
}

/// A stored resource: MIME type and raw bytes.
#[derive(Debug, Clone)]
struct Blob {
    mime: String,
    bytes: Vec<u8>,
}

/// In-memory [`DocumentResources`] backed by byte maps.
///
/// Useful for hosts that have already extracted the package, and for tests.
/// Fonts are keyed by relationship id; the obfuscation key is expected to be
/// applied before insertion.
#[derive(Debug, Default)]
pub struct MemoryResources {
    fonts: RwLock<HashMap<String, Blob>>,
    numbering_images: RwLock<HashMap<String, Blob>>,
    images: RwLock<HashMap<String, Blob>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_font(&self, id: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) {
        self.fonts.write().insert(
            id.into(),
            Blob {
                mime: mime.into(),
                bytes,
            },
        );
    }

    pub fn insert_numbering_image(
        &self,
        src: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) {
        self.numbering_images.write().insert(
            src.into(),
            Blob {
                mime: mime.into(),
                bytes,
            },
        );
    }

    pub fn insert_image(&self, src: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) {
        self.images.write().insert(
            src.into(),
            Blob {
                mime: mime.into(),
                bytes,
            },
        );
    }

    fn lookup(map: &RwLock<HashMap<String, Blob>>, id: &str) -> Result<String> {
        let guard = map.read();
        let blob = guard
            .get(id)
            .ok_or_else(|| Error::ResourceNotFound(id.to_string()))?;
        if blob.bytes.is_empty() {
            return Err(Error::ResourceLoad {
                id: id.to_string(),
                reason: "resource is empty".to_string(),
            });
        }
        Ok(data_url(&blob.mime, &blob.bytes))
    }
}

impl DocumentResources for MemoryResources {
    async fn load_font(&self, id: String, _key: Option<String>) -> Result<String> {
        Self::lookup(&self.fonts, &id)
    }

    async fn load_numbering_image(&self, src: String) -> Result<String> {
        Self::lookup(&self.numbering_images, &src)
    }

    async fn load_document_image(&self, src: String) -> Result<String> {
        Self::lookup(&self.images, &src)
    }
}
