//! Numbering rule generation.
//!
//! Decimal levels with a level-text template are rendered purely through CSS
//! counters: each level increments its own counter, descending into a level
//! resets the counter of the level below, and the template becomes the
//! `content` of a `:before` pseudo-element. Picture bullets use a custom
//! property that is filled once the image loads; every other format maps to
//! a native `list-style-type`.

use crate::common::{StyleValues, inherit_missing, style_values};
use crate::document::{NumberFormat, NumberingDefinition};
use crate::render::scope::StyleScopeNamer;
use crate::render::stylesheet::{push_css_escaped, write_rule};

/// A picture bullet whose image still has to be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletImage {
    /// Id of the image in the numbering part
    pub src: String,
    /// Custom property the bullet rule reads its background from
    pub variable: String,
}

/// Generated numbering style text plus pending bullet loads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberingRules {
    pub css: String,
    pub bullets: Vec<BulletImage>,
}

/// Converts numbering levels into counter-based style rules.
pub struct NumberingRuleGenerator<'a> {
    namer: &'a StyleScopeNamer,
}

impl<'a> NumberingRuleGenerator<'a> {
    pub fn new(namer: &'a StyleScopeNamer) -> Self {
        Self { namer }
    }

    /// Generate rules for every numbering level, in definition order.
    pub fn generate(&self, levels: &[NumberingDefinition]) -> NumberingRules {
        let mut rules = NumberingRules {
            css: String::with_capacity(levels.len() * 128),
            bullets: Vec::new(),
        };
        let mut root_counters = Vec::new();

        for num in levels {
            let selector = format!("p.{}", self.namer.numbering_class(&num.id, num.level));

            match (&num.format, num.level_text.as_deref(), &num.bullet) {
                (NumberFormat::Decimal, Some(level_text), _) => {
                    let counter = self.namer.numbering_counter(&num.id, num.level);

                    if num.level > 0 {
                        let parent = format!(
                            "p.{}",
                            self.namer.numbering_class(&num.id, num.level - 1)
                        );
                        write_rule(
                            &mut rules.css,
                            &parent,
                            &style_values([("counter-reset", counter.as_str())]),
                            None,
                        );
                    } else {
                        root_counters.push(counter.clone());
                    }

                    write_rule(
                        &mut rules.css,
                        &format!("{selector}:before"),
                        &style_values([
                            ("content", self.level_text_to_content(level_text, &num.id)),
                            ("counter-increment", counter),
                        ]),
                        None,
                    );
                    write_rule(
                        &mut rules.css,
                        &selector,
                        &list_item_values(&num.style, "none"),
                        None,
                    );
                },
                (_, _, Some(bullet)) => {
                    let variable = self.namer.bullet_variable(&bullet.src);
                    write_rule(
                        &mut rules.css,
                        &format!("{selector}:before"),
                        &style_values([
                            ("content", "' '".to_string()),
                            ("display", "inline-block".to_string()),
                            ("background", format!("var({variable})")),
                        ]),
                        Some(&bullet.style),
                    );
                    rules.bullets.push(BulletImage {
                        src: bullet.src.clone(),
                        variable,
                    });
                },
                (format, _, None) => {
                    write_rule(
                        &mut rules.css,
                        &selector,
                        &list_item_values(&num.style, format.css_list_style()),
                        None,
                    );
                },
            }
        }

        if !root_counters.is_empty() {
            write_rule(
                &mut rules.css,
                &format!(".{}", self.namer.wrapper_class()),
                &style_values([("counter-reset", root_counters.join(" "))]),
                None,
            );
        }

        rules
    }

    /// Turn a level-text template into a CSS `content` value.
    ///
    /// Each `%N` refers to the counter of level `N - 1`; literal text is
    /// kept and quoted.
    fn level_text_to_content(&self, text: &str, id: &str) -> String {
        let mut content = String::with_capacity(text.len() + 32);
        content.push('"');

        let mut chars = text.char_indices().peekable();
        while let Some((start, c)) = chars.next() {
            if c == '%' {
                let digits_start = start + 1;
                let mut digits_end = digits_start;
                while let Some((i, d)) = chars.next_if(|(_, d)| d.is_ascii_digit()) {
                    digits_end = i + d.len_utf8();
                }
                let level = text[digits_start..digits_end]
                    .parse::<u16>()
                    .ok()
                    .filter(|n| (1..=u8::MAX as u16 + 1).contains(n));
                match level {
                    Some(n) => {
                        content.push_str("\" counter(");
                        content.push_str(&self.namer.numbering_counter(id, (n - 1) as u8));
                        content.push_str(") \"");
                    },
                    None => {
                        content.push('%');
                        push_css_escaped(&mut content, &text[digits_start..digits_end]);
                    },
                }
            } else {
                push_css_escaped(&mut content, &text[start..start + c.len_utf8()]);
            }
        }

        content.push('"');
        content
    }
}

/// Explicit level styling merged over the generated list-item defaults.
fn list_item_values(explicit: &StyleValues, list_style_type: &str) -> StyleValues {
    let mut values = explicit.clone();
    let defaults = style_values([
        ("display", "list-item"),
        ("list-style-position", "inside"),
        ("list-style-type", list_style_type),
    ]);
    inherit_missing(&defaults, &mut values, None);
    values
}
