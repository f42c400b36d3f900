//! Line layout
//!
//! ```text
//! SEVERITY prefix: file:line message [k1=v1 k2=v2]
//! SEVERITY prefix: file:line <trailing line>
//! ```

use sevlog_core_types::{ContextMap, Severity};

use crate::site::CallSite;

/// Everything that goes into one formatted record
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub severity: Severity,
    pub prefix: &'a str,
    pub site: CallSite,
    pub message: &'a str,
    pub context: &'a ContextMap,
    pub trailing: &'a [String],
}

/// Format a record as one newline-terminated line per entry
///
/// Trailing lines repeat the `SEVERITY prefix: file:line ` header so every
/// line can be attributed on its own.
pub fn format_record(line: &Line<'_>) -> String {
    let header = format!("{} {}: {} ", line.severity, line.prefix, line.site);

    let mut out = String::with_capacity(header.len() * (1 + line.trailing.len()) + 64);
    out.push_str(&header);
    out.push_str(line.message);
    if let Some(ctx) = render_context(line.context) {
        out.push(' ');
        out.push_str(&ctx);
    }
    out.push('\n');

    for extra in line.trailing {
        out.push_str(&header);
        out.push_str(extra);
        out.push('\n');
    }
    out
}

/// `[k1=v1 k2=v2]` in key order, or `None` for an empty map
pub fn render_context(ctx: &ContextMap) -> Option<String> {
    if ctx.is_empty() {
        return None;
    }
    let pairs: Vec<String> = ctx.iter().map(|(k, v)| format!("{k}={v}")).collect();
    Some(format!("[{}]", pairs.join(" ")))
}
