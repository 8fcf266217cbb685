//! Numbering definitions: multi-level list formats resolved per level.

use crate::common::StyleValues;
use phf::phf_map;

/// Number format of a numbering level (`w:numFmt`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    Decimal,
    Bullet,
    LowerLetter,
    UpperLetter,
    LowerRoman,
    UpperRoman,
    None,
    /// Any format the renderer has no dedicated handling for
    Other(String),
}

static FORMATS: phf::Map<&'static str, NumberFormat> = phf_map! {
    "decimal" => NumberFormat::Decimal,
    "bullet" => NumberFormat::Bullet,
    "lowerLetter" => NumberFormat::LowerLetter,
    "upperLetter" => NumberFormat::UpperLetter,
    "lowerRoman" => NumberFormat::LowerRoman,
    "upperRoman" => NumberFormat::UpperRoman,
    "none" => NumberFormat::None,
};

impl NumberFormat {
    /// Parse the format from its XML attribute value.
    ///
    /// Unknown values are preserved as [`NumberFormat::Other`].
    pub fn from_xml(s: &str) -> Self {
        FORMATS
            .get(s)
            .cloned()
            .unwrap_or_else(|| Self::Other(s.to_string()))
    }

    /// Native CSS `list-style-type` keyword for this format.
    ///
    /// Unrecognized formats pass through unchanged.
    pub fn css_list_style(&self) -> &str {
        match self {
            Self::Decimal => "decimal",
            Self::Bullet => "disc",
            Self::LowerLetter => "lower-alpha",
            Self::UpperLetter => "upper-alpha",
            Self::LowerRoman => "lower-roman",
            Self::UpperRoman => "upper-roman",
            Self::None => "none",
            Self::Other(s) => s,
        }
    }
}

/// Picture bullet of a numbering level (`w:lvlPicBulletId`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberingBullet {
    /// Id of the bullet image in the numbering part
    pub src: String,
    /// Extra declarations for the bullet box (size)
    pub style: StyleValues,
}

impl NumberingBullet {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            style: StyleValues::new(),
        }
    }
}

/// One level of a numbering definition, addressed by (numbering id, level).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingDefinition {
    /// Numbering instance id (`w:numId`)
    pub id: String,
    /// Zero-based level
    pub level: u8,
    pub format: NumberFormat,
    /// Level text template, e.g. `%1.%2.`
    pub level_text: Option<String>,
    pub bullet: Option<NumberingBullet>,
    /// Explicit per-level paragraph styling (indentation)
    pub style: StyleValues,
}

impl NumberingDefinition {
    /// Create a level with no template, bullet, or styling.
    pub fn new(id: impl Into<String>, level: u8, format: NumberFormat) -> Self {
        Self {
            id: id.into(),
            level,
            format,
            level_text: None,
            bullet: None,
            style: StyleValues::new(),
        }
    }

    pub fn with_level_text(mut self, text: impl Into<String>) -> Self {
        self.level_text = Some(text.into());
        self
    }

    pub fn with_bullet(mut self, bullet: NumberingBullet) -> Self {
        self.bullet = Some(bullet);
        self
    }

    pub fn with_style(mut self, style: StyleValues) -> Self {
        self.style = style;
        self
    }
}
