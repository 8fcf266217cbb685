//! Deterministic class-name scoping.
//!
//! Document style ids are arbitrary strings ("Heading 1", "Table Grid") that
//! may collide with classes of the host page. Every generated name is
//! escaped and prefixed with the namespace class.

/// Produces scoped class, counter and custom-property names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleScopeNamer {
    namespace: String,
}

impl StyleScopeNamer {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// The namespace class itself.
    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Class of the element wrapping all sections.
    pub fn wrapper_class(&self) -> String {
        format!("{}-wrapper", self.namespace)
    }

    /// Escape a document identifier for use inside a class name.
    ///
    /// Runs of spaces and dots become a single `-`, runs of `&` become `and`,
    /// and the result is lower-cased.
    pub fn escape(id: &str) -> String {
        let mut out = String::with_capacity(id.len());
        let mut chars = id.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                ' ' | '.' => {
                    while chars.next_if(|n| *n == ' ' || *n == '.').is_some() {}
                    out.push('-');
                },
                '&' => {
                    while chars.next_if(|n| *n == '&').is_some() {}
                    out.push_str("and");
                },
                c => out.extend(c.to_lowercase()),
            }
        }
        out
    }

    /// Scoped class for a declared class name.
    ///
    /// Elements without a declared class receive the bare namespace class.
    pub fn scoped(&self, class_name: Option<&str>) -> String {
        match class_name {
            Some(name) if !name.is_empty() => {
                format!("{}_{}", self.namespace, Self::escape(name))
            },
            _ => self.namespace.clone(),
        }
    }

    /// Class marking paragraphs of a numbering level.
    pub fn numbering_class(&self, id: &str, level: u8) -> String {
        let mut buffer = itoa::Buffer::new();
        format!(
            "{}-num-{}-{}",
            self.namespace,
            Self::escape(id),
            buffer.format(level)
        )
    }

    /// CSS counter driving a numbering level.
    ///
    /// Counters live in their own CSS namespace, so sharing the spelling of
    /// the level class is harmless.
    pub fn numbering_counter(&self, id: &str, level: u8) -> String {
        self.numbering_class(id, level)
    }

    /// Custom property holding a picture-bullet image.
    pub fn bullet_variable(&self, src: &str) -> String {
        let escaped: String = src
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect();
        format!("--{}-{}", self.namespace.to_lowercase(), escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(StyleScopeNamer::escape("Heading 1"), "heading-1");
        assert_eq!(StyleScopeNamer::escape("a. .b"), "a-b");
        assert_eq!(StyleScopeNamer::escape("Q&&A"), "qanda");
    }

    #[test]
    fn test_scoped_names() {
        let namer = StyleScopeNamer::new("docx");
        assert_eq!(namer.scoped(Some("TableGrid")), "docx_tablegrid");
        assert_eq!(namer.scoped(None), "docx");
        assert_eq!(namer.scoped(Some("")), "docx");
        assert_eq!(namer.wrapper_class(), "docx-wrapper");
    }

    #[test]
    fn test_numbering_names_are_per_id_and_level() {
        let namer = StyleScopeNamer::new("docx");
        assert_eq!(namer.numbering_class("3", 1), "docx-num-3-1");
        assert_ne!(namer.numbering_counter("1", 0), namer.numbering_counter("2", 0));
        assert_eq!(namer.bullet_variable("rId1"), "--docx-rid1");
    }
}
