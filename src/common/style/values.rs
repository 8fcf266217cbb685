//! Ordered CSS property maps.

use indexmap::IndexMap;

/// Resolved style values: CSS property name mapped to its value.
///
/// Keys are unique and iteration follows insertion order, which keeps the
/// generated style text deterministic from one render to the next.
pub type StyleValues = IndexMap<String, String>;

/// Build a [`StyleValues`] map from `(property, value)` pairs.
///
/// # Examples
///
/// ```rust
/// use docx_preview::common::style_values;
///
/// let values = style_values([("color", "red"), ("font-size", "11pt")]);
/// assert_eq!(values.get("color").map(String::as_str), Some("red"));
/// ```
pub fn style_values<I, K, V>(pairs: I) -> StyleValues
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Copy properties from `from` into `to` where `to` does not define them.
///
/// Values already present in `to` are never overwritten: the source only
/// supplies fallbacks. When `only` is given, copying is restricted to those
/// property names.
pub fn inherit_missing(from: &StyleValues, to: &mut StyleValues, only: Option<&[&str]>) {
    match only {
        Some(keys) => {
            for key in keys {
                if let Some(value) = from.get(*key)
                    && !to.contains_key(*key)
                {
                    to.insert((*key).to_string(), value.clone());
                }
            }
        },
        None => {
            for (key, value) in from {
                if !to.contains_key(key) {
                    to.insert(key.clone(), value.clone());
                }
            }
        },
    }
}
