//! Execution traces.

use crate::core::StepStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a trace node stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// A leaf step.
    Step,
    /// A nested story and the slots entered inside it.
    Story {
        /// Qualified name of the story that served the slot.
        story: String,
        /// Entered slots, in order.
        children: Vec<TraceNode>,
    },
}

/// One entered slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceNode {
    /// The slot name.
    pub name: String,
    /// `Owner.name` of the substitute serving the slot, if injected.
    pub substitute: Option<String>,
    /// How the slot ended.
    pub status: StepStatus,
    /// Leaf or nested story.
    pub kind: NodeKind,
}

impl TraceNode {
    /// Creates a pending leaf node.
    #[must_use]
    pub fn step(name: impl Into<String>, substitute: Option<String>) -> Self {
        Self {
            name: name.into(),
            substitute,
            status: StepStatus::Pending,
            kind: NodeKind::Step,
        }
    }

    /// Creates a pending story node.
    #[must_use]
    pub fn story(
        name: impl Into<String>,
        story: impl Into<String>,
        substitute: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            substitute,
            status: StepStatus::Pending,
            kind: NodeKind::Story {
                story: story.into(),
                children: Vec::new(),
            },
        }
    }

    /// Returns true for leaf steps.
    #[must_use]
    pub fn is_step(&self) -> bool {
        matches!(self.kind, NodeKind::Step)
    }

    /// Returns the entered children of a story node.
    #[must_use]
    pub fn children(&self) -> &[TraceNode] {
        match &self.kind {
            NodeKind::Step => &[],
            NodeKind::Story { children, .. } => children,
        }
    }

    /// Finds the first node with the given slot name, depth first.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&TraceNode> {
        if self.name == name {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(name))
    }
}

/// The record of one top-level call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Unique id of the call.
    pub run_id: Uuid,
    /// Qualified name of the called story.
    pub story: String,
    /// Entered top-level slots, in order.
    pub nodes: Vec<TraceNode>,
}

impl Trace {
    /// Creates an empty trace.
    #[must_use]
    pub fn new(run_id: Uuid, story: impl Into<String>) -> Self {
        Self {
            run_id,
            story: story.into(),
            nodes: Vec::new(),
        }
    }

    /// Finds the first node with the given slot name, depth first.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&TraceNode> {
        self.nodes.iter().find_map(|node| node.find(name))
    }

    /// Renders the trace as an annotated tree.
    #[must_use]
    pub fn render(&self) -> String {
        super::render::render_trace(self)
    }
}

/// Receives the trace of every finished call.
pub trait TraceSink: Send + Sync + std::fmt::Debug {
    /// Records one finished call.
    fn record(&self, trace: &Trace);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_nested() {
        let mut story = TraceNode::story("x", "Simple.x", Some("Simple.x".to_string()));
        if let NodeKind::Story { children, .. } = &mut story.kind {
            children.push(TraceNode::step("two", None));
        }
        let mut trace = Trace::new(Uuid::new_v4(), "SubstoryDI.y");
        trace.nodes.push(TraceNode::step("before", None));
        trace.nodes.push(story);

        assert!(trace.find("two").unwrap().is_step());
        assert_eq!(trace.find("x").unwrap().children().len(), 1);
        assert!(trace.find("after").is_none());
    }

    #[test]
    fn test_trace_serializes() {
        let mut trace = Trace::new(Uuid::nil(), "Simple.x");
        let mut node = TraceNode::step("one", None);
        node.status = StepStatus::Completed;
        trace.nodes.push(node);

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["nodes"][0]["status"]["status"], "completed");
        assert_eq!(json["nodes"][0]["kind"]["type"], "step");
    }
}
