//! Story execution.
//!
//! One call walks the bound story tree depth first against a single
//! context. Leaf outcomes drive the walk:
//!
//! - `Next` extends the context and moves on
//! - `ScopeEnd` ends the innermost story; its parent moves on
//! - `Return` and `Abort` unwind every enclosing story

use super::bind::{BoundStory, SlotTarget};
use crate::config::StoryConfig;
use crate::context::{Context, Origin};
use crate::contracts::Contract;
use crate::core::{Outcome, StepStatus};
use crate::errors::StoryError;
use crate::events::{self, types, EventSink};
use crate::observability::{NodeKind, Trace, TraceNode, TraceSink};
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How a story walk ended, seen from its caller.
#[derive(Debug, Clone, PartialEq)]
enum Flow {
    Completed,
    ScopeEnded,
    Returned(Value),
    Aborted { step: String, reason: Option<String> },
}

/// Final state of a top-level call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Terminal {
    Succeeded(Option<Value>),
    Failed { step: String, reason: Option<String> },
}

/// Everything a finished call leaves behind.
#[derive(Debug, Clone)]
pub(crate) struct Execution {
    pub terminal: Terminal,
    pub context: Context,
    pub trace: Trace,
}

struct Walk<'a> {
    run_id: Uuid,
    story: String,
    ctx: Context,
    contract: &'a Contract,
    sink: Option<Arc<dyn EventSink>>,
    trace_sinks: Vec<Arc<dyn TraceSink>>,
}

/// Runs `story` with already bound call arguments.
///
/// Arguments are checked against the merged contract of the whole story
/// tree before any step runs.
pub(crate) fn execute(
    story: &BoundStory,
    config: &StoryConfig,
    event_sink: Option<&Arc<dyn EventSink>>,
    arguments: IndexMap<String, Value>,
) -> Result<Execution, StoryError> {
    let definition = &story.definition;
    let arguments = story.contract.validate(
        definition.arguments.iter().map(String::as_str),
        &arguments,
    )?;

    let sink = config
        .emit_events
        .then(|| event_sink.cloned().unwrap_or_else(events::get_event_sink));

    let mut walk = Walk {
        run_id: Uuid::new_v4(),
        story: story.qualified_name(),
        ctx: Context::seed(arguments)?,
        contract: &story.contract,
        sink,
        trace_sinks: Vec::new(),
    };

    let span = tracing::debug_span!("story", story = %walk.story, run_id = %walk.run_id);
    let _guard = span.enter();

    walk.emit(types::STORY_STARTED, None);
    let mut nodes = Vec::new();
    let flow = walk.run_story(story, &mut nodes)?;

    let terminal = match flow {
        Flow::Completed | Flow::ScopeEnded => Terminal::Succeeded(None),
        Flow::Returned(value) => Terminal::Succeeded(Some(value)),
        Flow::Aborted { step, reason } => Terminal::Failed { step, reason },
    };

    match &terminal {
        Terminal::Succeeded(value) => {
            info!(story = %walk.story, run_id = %walk.run_id, value = ?value, "Story completed");
            walk.emit(types::STORY_COMPLETED, Some(json!({ "value": value })));
        }
        Terminal::Failed { step, reason } => {
            warn!(story = %walk.story, run_id = %walk.run_id, step = %step, reason = ?reason, "Story failed");
            walk.emit(
                types::STORY_FAILED,
                Some(json!({ "step": step, "reason": reason })),
            );
        }
    }

    let trace = Trace {
        run_id: walk.run_id,
        story: walk.story.clone(),
        nodes,
    };
    if config.record_trace {
        for sink in &walk.trace_sinks {
            sink.record(&trace);
        }
    }

    Ok(Execution {
        terminal,
        context: walk.ctx,
        trace,
    })
}

impl<'a> Walk<'a> {
    fn emit(&self, event_type: &str, data: Option<Value>) {
        let Some(sink) = &self.sink else {
            return;
        };
        let mut payload = json!({ "story": self.story, "run_id": self.run_id.to_string() });
        if let (Some(Value::Object(extra)), Some(map)) = (data, payload.as_object_mut()) {
            map.extend(extra);
        }
        sink.try_emit(event_type, Some(payload));
    }

    fn watch(&mut self, story: &BoundStory) {
        for sink in &story.trace_sinks {
            if !self.trace_sinks.iter().any(|known| Arc::ptr_eq(known, sink)) {
                self.trace_sinks.push(Arc::clone(sink));
            }
        }
    }

    /// Walks one story; nodes for entered slots are appended to `nodes`.
    fn run_story(
        &mut self,
        story: &'a BoundStory,
        nodes: &mut Vec<TraceNode>,
    ) -> Result<Flow, StoryError> {
        self.watch(story);
        self.run_slots(story, nodes)
    }

    fn run_slots(
        &mut self,
        story: &'a BoundStory,
        nodes: &mut Vec<TraceNode>,
    ) -> Result<Flow, StoryError> {
        for slot in &story.slots {
            match &slot.target {
                SlotTarget::Step { owner, step } => {
                    let mut node = TraceNode::step(&slot.name, slot.substitute.clone());
                    let outcome = step.call(&self.ctx);
                    debug!(
                        story = %story.qualified_name(),
                        step = %slot.name,
                        run_id = %self.run_id,
                        outcome = %outcome,
                        "Step finished"
                    );

                    let flow = match outcome {
                        Outcome::Next(updates) => {
                            let updates = self.convert_updates(updates)?;
                            let keys: Vec<String> = updates.keys().cloned().collect();
                            self.ctx.extend(updates, &Origin::step(owner, &slot.name))?;
                            node.status = StepStatus::Completed;
                            self.emit(
                                types::STEP_COMPLETED,
                                Some(json!({ "step": slot.name, "keys": keys })),
                            );
                            None
                        }
                        Outcome::Abort(reason) => {
                            node.status = StepStatus::Failed;
                            self.emit(
                                types::STEP_FAILED,
                                Some(json!({ "step": slot.name, "reason": reason })),
                            );
                            Some(Flow::Aborted {
                                step: slot.name.clone(),
                                reason,
                            })
                        }
                        Outcome::Return(value) => {
                            node.status = StepStatus::Returned(value.clone());
                            self.emit(
                                types::STEP_RETURNED,
                                Some(json!({ "step": slot.name, "value": value })),
                            );
                            Some(Flow::Returned(value))
                        }
                        Outcome::ScopeEnd => {
                            node.status = StepStatus::Skipped;
                            self.emit(types::STEP_SKIPPED, Some(json!({ "step": slot.name })));
                            Some(Flow::ScopeEnded)
                        }
                    };
                    nodes.push(node);
                    if let Some(flow) = flow {
                        return Ok(flow);
                    }
                }
                SlotTarget::Story(child) => {
                    self.enter(child)?;
                    let mut children = Vec::new();
                    let flow = self.run_story(child, &mut children)?;
                    nodes.push(TraceNode {
                        name: slot.name.clone(),
                        substitute: slot.substitute.clone(),
                        status: nested_status(&flow),
                        kind: NodeKind::Story {
                            story: child.qualified_name(),
                            children,
                        },
                    });
                    match flow {
                        Flow::Completed | Flow::ScopeEnded => {}
                        unwinding => return Ok(unwinding),
                    }
                }
            }
        }
        Ok(Flow::Completed)
    }

    /// Checks that every declared argument of a nested story is already in
    /// the context.
    ///
    /// Stored values went through the merged contract when they were added.
    fn enter(&self, story: &BoundStory) -> Result<(), StoryError> {
        for name in &story.definition.arguments {
            self.ctx.get(name)?;
        }
        Ok(())
    }

    /// Passes each update through the merged contract.
    fn convert_updates(
        &self,
        updates: IndexMap<String, Value>,
    ) -> Result<IndexMap<String, Value>, StoryError> {
        updates
            .into_iter()
            .map(|(key, value)| -> Result<(String, Value), StoryError> {
                let converted = match self.contract.convert(&key, &value) {
                    Some(result) => result?,
                    None => value,
                };
                Ok((key, converted))
            })
            .collect()
    }
}

fn nested_status(flow: &Flow) -> StepStatus {
    match flow {
        Flow::Completed => StepStatus::Completed,
        Flow::ScopeEnded => StepStatus::Skipped,
        Flow::Returned(value) => StepStatus::Returned(value.clone()),
        Flow::Aborted { .. } => StepStatus::Failed,
    }
}
