//! Provenance rendering.

use super::Context;

const INDENT: &str = "    ";

/// Renders `Context()` for an empty context, otherwise one aligned line per key:
///
/// ```text
/// Context:
///     aaaa = 0  # Story argument
///     bbb = 1   # Set by SimpleCtxRepr.one
/// ```
pub(super) fn render_context(ctx: &Context) -> String {
    if ctx.is_empty() {
        return "Context()".to_string();
    }

    let assignments: Vec<(String, String)> = ctx
        .iter()
        .map(|(key, entry)| (format!("{key} = {}", entry.value), entry.origin.to_string()))
        .collect();
    let width = assignments
        .iter()
        .map(|(assignment, _)| assignment.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec!["Context:".to_string()];
    lines.extend(
        assignments
            .iter()
            .map(|(assignment, origin)| format!("{INDENT}{assignment:<width$}  # {origin}")),
    );
    lines.join("\n")
}
