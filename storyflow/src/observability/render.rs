//! Text renderings of story structure and execution traces.
//!
//! Both renderings indent two spaces per nesting level. Substituted slots
//! are written as `slot (Owner.story)`.

use super::trace::{NodeKind, Trace, TraceNode};
use serde::Serialize;

const INDENT: &str = "  ";
const EMPTY_MARKER: &str = "<empty>";

/// Static shape of one slot, as declared and resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineNode {
    /// The slot name.
    pub name: String,
    /// `Owner.name` of the substitute serving the slot, if injected.
    pub substitute: Option<String>,
    /// `None` for a leaf step, the nested slots for a story.
    pub children: Option<Vec<OutlineNode>>,
}

/// Renders the declared structure of a story.
///
/// A story with no slots renders an `<empty>` marker in place of its body.
#[must_use]
pub fn render_outline(story: &str, slots: &[OutlineNode]) -> String {
    let mut lines = vec![story.to_string()];
    outline_body(slots, 1, &mut lines);
    lines.join("\n")
}

fn outline_body(slots: &[OutlineNode], depth: usize, lines: &mut Vec<String>) {
    let pad = INDENT.repeat(depth);
    if slots.is_empty() {
        lines.push(format!("{pad}{EMPTY_MARKER}"));
        return;
    }
    for slot in slots {
        lines.push(format!("{pad}{}", label(&slot.name, slot.substitute.as_deref())));
        if let Some(children) = &slot.children {
            outline_body(children, depth + 1, lines);
        }
    }
}

/// Renders an execution trace.
///
/// Leaf steps that failed, skipped or returned carry that classification.
/// Slots after the point of termination are not listed.
#[must_use]
pub fn render_trace(trace: &Trace) -> String {
    let header = format!("Proxy({})", trace.story);
    if trace.nodes.is_empty() {
        return header;
    }
    let mut lines = vec![format!("{header}:")];
    trace_body(&trace.nodes, 1, &mut lines);
    lines.join("\n")
}

fn trace_body(nodes: &[TraceNode], depth: usize, lines: &mut Vec<String>) {
    let pad = INDENT.repeat(depth);
    for node in nodes {
        let mut line = format!("{pad}{}", label(&node.name, node.substitute.as_deref()));
        match &node.kind {
            NodeKind::Step => {
                if let Some(annotation) = node.status.annotation() {
                    line.push_str(&format!(" ({annotation})"));
                }
                lines.push(line);
            }
            NodeKind::Story { children, .. } => {
                lines.push(line);
                trace_body(children, depth + 1, lines);
            }
        }
    }
}

fn label(name: &str, substitute: Option<&str>) -> String {
    match substitute {
        Some(origin) => format!("{name} ({origin})"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StepStatus;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;

    fn leaf(name: &str) -> OutlineNode {
        OutlineNode {
            name: name.to_string(),
            substitute: None,
            children: None,
        }
    }

    fn done(name: &str, status: StepStatus) -> TraceNode {
        let mut node = TraceNode::step(name, None);
        node.status = status;
        node
    }

    #[test]
    fn test_outline_flat() {
        let slots = vec![leaf("one"), leaf("two"), leaf("three")];
        assert_eq!(
            render_outline("Simple.x", &slots),
            "Simple.x\n  one\n  two\n  three"
        );
    }

    #[test]
    fn test_outline_empty_nested() {
        let slots = vec![OutlineNode {
            name: "x".to_string(),
            substitute: None,
            children: Some(Vec::new()),
        }];
        assert_eq!(
            render_outline("EmptySubstory.y", &slots),
            "EmptySubstory.y\n  x\n    <empty>"
        );
        assert_eq!(render_outline("Empty.x", &[]), "Empty.x\n  <empty>");
    }

    #[test]
    fn test_trace_with_substitute() {
        let mut story = TraceNode::story("x", "Simple.x", Some("Simple.x".to_string()));
        story.status = StepStatus::Completed;
        if let NodeKind::Story { children, .. } = &mut story.kind {
            children.push(done("one", StepStatus::Completed));
            children.push(done("two", StepStatus::Skipped));
        }
        let mut trace = Trace::new(Uuid::new_v4(), "SubstoryDI.y");
        trace.nodes.push(done("before", StepStatus::Completed));
        trace.nodes.push(story);
        trace.nodes.push(done("after", StepStatus::Returned(json!(-4))));

        let expected = "\
Proxy(SubstoryDI.y):
  before
  x (Simple.x)
    one
    two (skipped)
  after (returned: -4)";
        assert_eq!(trace.render(), expected);
    }

    #[test]
    fn test_trace_nothing_entered() {
        let trace = Trace::new(Uuid::new_v4(), "Empty.x");
        assert_eq!(render_trace(&trace), "Proxy(Empty.x)");
    }
}
