//! Style cascade resolution.
//!
//! Turns the document's style definitions into flat, scoped rule sets:
//! `basedOn` chains are folded into each derived style (base values only
//! fill gaps), ids are mapped to scoped class names, and `linked` styles
//! contribute their rule sets under the linking style's selector.

use crate::common::inherit_missing;
use crate::document::{StyleDefinition, SubStyle};
use crate::render::scope::StyleScopeNamer;
use crate::render::stylesheet::write_rule;
use std::collections::HashMap;

/// A style definition after inheritance resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub definition: StyleDefinition,
    /// Scoped class name derived from the style id
    pub css_name: String,
}

/// Resolved styles, in document order, with lookup by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    styles: Vec<ResolvedStyle>,
    by_id: HashMap<String, usize>,
}

impl StyleMap {
    /// Look up a resolved style by its document id.
    pub fn get(&self, id: &str) -> Option<&ResolvedStyle> {
        self.by_id.get(id).map(|&i| &self.styles[i])
    }

    /// All resolved styles in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedStyle> {
        self.styles.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    Active,
    Done,
}

/// Resolves style inheritance and emits scoped style rules.
pub struct StyleCascadeResolver<'a> {
    namer: &'a StyleScopeNamer,
    debug: bool,
}

impl<'a> StyleCascadeResolver<'a> {
    pub fn new(namer: &'a StyleScopeNamer, debug: bool) -> Self {
        Self { namer, debug }
    }

    /// Resolve `basedOn` inheritance and assign scoped class names.
    ///
    /// Derived values always win; a missing or cyclic base is reported and
    /// skipped.
    pub fn resolve(&self, styles: Vec<StyleDefinition>) -> StyleMap {
        let by_id: HashMap<String, usize> = styles
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.id.clone().map(|id| (id, i)))
            .collect();

        let mut styles = styles;
        let mut visits = vec![Visit::Pending; styles.len()];
        for index in 0..styles.len() {
            self.inherit(index, &mut styles, &by_id, &mut visits);
        }

        let styles = styles
            .into_iter()
            .map(|definition| ResolvedStyle {
                css_name: self.namer.scoped(definition.id.as_deref()),
                definition,
            })
            .collect();

        StyleMap { styles, by_id }
    }

    fn inherit(
        &self,
        index: usize,
        styles: &mut [StyleDefinition],
        by_id: &HashMap<String, usize>,
        visits: &mut [Visit],
    ) {
        if visits[index] != Visit::Pending {
            return;
        }
        visits[index] = Visit::Active;

        if let Some(base_id) = styles[index].based_on.clone() {
            match by_id.get(&base_id) {
                Some(&base) if visits[base] == Visit::Active => {
                    self.report(format_args!(
                        "Style {:?} inherits from itself through {:?}",
                        styles[index].id, base_id
                    ));
                },
                Some(&base) => {
                    self.inherit(base, styles, by_id, visits);
                    if styles[index].page_break_before.is_none() {
                        styles[index].page_break_before = styles[base].page_break_before;
                    }
                    let base_styles = styles[base].styles.clone();
                    for sub_style in &mut styles[index].styles {
                        if let Some(base_sub) = base_styles.iter().find(|b| b.target == sub_style.target) {
                            inherit_missing(&base_sub.values, &mut sub_style.values, None);
                        }
                    }
                },
                None => self.report(format_args!("Can't find base style {base_id}")),
            }
        }

        visits[index] = Visit::Done;
    }

    /// Emit one rule block per (style, sub-style) pair.
    ///
    /// When several styles are default for the same target, the last one
    /// declared gets the namespace selector.
    pub fn render_rules(&self, map: &StyleMap) -> String {
        let mut defaults: HashMap<&str, usize> = HashMap::new();
        for (i, style) in map.styles.iter().enumerate() {
            if style.definition.is_default
                && let Some(target) = style.definition.target.as_deref()
            {
                defaults.insert(target, i);
            }
        }

        let mut css = String::with_capacity(map.styles.len() * 64);
        for (i, style) in map.styles.iter().enumerate() {
            let definition = &style.definition;
            let linked: &[SubStyle] = match definition.linked.as_deref() {
                Some(linked_id) => match map.get(linked_id) {
                    Some(linked) => linked.definition.styles.as_slice(),
                    None => {
                        self.report(format_args!("Can't find linked style {linked_id}"));
                        &[]
                    },
                },
                None => &[],
            };

            for sub_style in definition.styles.iter().chain(linked) {
                let mut selector = match definition.target.as_deref() {
                    Some(target) if target == sub_style.target => {
                        format!("{target}.{}", style.css_name)
                    },
                    Some(target) => format!("{target}.{} {}", style.css_name, sub_style.target),
                    None => format!(".{} {}", style.css_name, sub_style.target),
                };

                if let Some(target) = definition.target.as_deref()
                    && defaults.get(target) == Some(&i)
                {
                    selector = format!(".{} {target}, {selector}", self.namer.namespace());
                }

                write_rule(&mut css, &selector, &sub_style.values, None);
            }
        }
        css
    }

    fn report(&self, message: std::fmt::Arguments<'_>) {
        if self.debug {
            log::warn!("{message}");
        } else {
            log::trace!("{message}");
        }
    }
}
