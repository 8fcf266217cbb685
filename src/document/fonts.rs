//! Font table: fonts declared by the document and their embedded data.

/// Variant of an embedded font file (`w:embedRegular`, `w:embedBold`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmbedFontType {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl EmbedFontType {
    /// Whether the face declares a bold weight.
    #[inline]
    pub const fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    /// Whether the face declares an italic style.
    #[inline]
    pub const fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }
}

/// Reference to an embedded font file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmbedFontRef {
    /// Relationship id used to fetch the bytes
    pub id: String,
    /// Obfuscation key (`w:fontKey`)
    pub key: Option<String>,
    pub font_type: EmbedFontType,
}

/// An entry of the font table part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontEntry {
    /// Font family name
    pub name: String,
    pub embed_refs: Vec<EmbedFontRef>,
}

impl FontEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            embed_refs: Vec::new(),
        }
    }

    pub fn with_embed(
        mut self,
        id: impl Into<String>,
        key: Option<String>,
        font_type: EmbedFontType,
    ) -> Self {
        self.embed_refs.push(EmbedFontRef {
            id: id.into(),
            key,
            font_type,
        });
        self
    }
}
