//! Ordered style-sheet text.
//!
//! Each render component returns its generated rules as blocks; the renderer
//! concatenates them once, in order. Blocks that depend on asynchronously
//! loaded data are reserved up front as [`StyleSlot`]s and filled in later,
//! so a late patch never reorders the sheet.

use crate::common::StyleValues;

/// One block of the style sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleBlock {
    /// A `/* ... */` comment announcing the following block
    Comment(String),
    /// Raw rule text
    Rules(String),
}

/// Stable handle of a reserved style block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleSlot(usize);

/// Style-sheet text assembled from ordered blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    blocks: Vec<StyleBlock>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a comment block.
    pub fn push_comment(&mut self, text: impl Into<String>) {
        self.blocks.push(StyleBlock::Comment(text.into()));
    }

    /// Append a rule block.
    pub fn push_rules(&mut self, text: impl Into<String>) {
        self.blocks.push(StyleBlock::Rules(text.into()));
    }

    /// Reserve an empty rule block to be filled later.
    pub fn reserve_slot(&mut self) -> StyleSlot {
        self.blocks.push(StyleBlock::Rules(String::new()));
        StyleSlot(self.blocks.len() - 1)
    }

    /// Fill a reserved block. Returns false for an unknown slot.
    pub fn fill_slot(&mut self, slot: StyleSlot, text: impl Into<String>) -> bool {
        match self.blocks.get_mut(slot.0) {
            Some(StyleBlock::Rules(rules)) => {
                *rules = text.into();
                true
            },
            _ => false,
        }
    }

    /// Blocks in sheet order.
    #[inline]
    pub fn blocks(&self) -> &[StyleBlock] {
        &self.blocks
    }

    /// Concatenate all blocks into style-sheet text. Empty blocks are skipped.
    pub fn to_css(&self) -> String {
        let capacity = self
            .blocks
            .iter()
            .map(|b| match b {
                StyleBlock::Comment(c) => c.len() + 7,
                StyleBlock::Rules(r) => r.len(),
            })
            .sum();
        let mut css = String::with_capacity(capacity);
        for block in &self.blocks {
            match block {
                StyleBlock::Comment(text) => {
                    css.push_str("/* ");
                    css.push_str(text);
                    css.push_str(" */\n");
                },
                StyleBlock::Rules(text) if !text.is_empty() => css.push_str(text),
                StyleBlock::Rules(_) => {},
            }
        }
        css
    }
}

/// Append one rule block to `out`.
///
/// Declarations are emitted verbatim in map order; `extra` declarations
/// follow the main ones.
pub fn write_rule(out: &mut String, selector: &str, values: &StyleValues, extra: Option<&StyleValues>) {
    out.push_str(selector);
    out.push_str(" {\n");
    for (key, value) in values.iter().chain(extra.into_iter().flatten()) {
        out.push_str("  ");
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push_str(";\n");
    }
    out.push_str("}\n");
}

/// Append `text` for use inside a double-quoted CSS string.
pub fn push_css_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Format one rule block.
pub fn rule(selector: &str, values: &StyleValues) -> String {
    let mut out = String::new();
    write_rule(&mut out, selector, values, None);
    out
}
