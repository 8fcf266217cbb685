//! Predefined rules emitted ahead of the document's own styles.

use crate::render::scope::StyleScopeNamer;

/// Baseline rules for the page boxes and common elements, scoped to the
/// namespace class.
pub fn baseline_css(namer: &StyleScopeNamer) -> String {
    let ns = namer.namespace();
    let wrapper = namer.wrapper_class();
    format!(
        ".{wrapper} {{ background: gray; padding: 30px; padding-bottom: 0px; display: flex; flex-flow: column; align-items: center; }}
.{wrapper} > section.{ns} {{ background: white; box-shadow: 0 0 10px rgba(0, 0, 0, 0.5); margin-bottom: 30px; }}
.{ns} {{ color: black; }}
section.{ns} {{ box-sizing: border-box; }}
.{ns} table {{ border-collapse: collapse; }}
.{ns} table td, .{ns} table th {{ vertical-align: top; }}
.{ns} p {{ margin: 0pt; }}
.{ns} span {{ white-space: pre-wrap; }}
.{ns} a {{ color: inherit; text-decoration: inherit; }}
"
    )
}
