//! Resolution of slot names into an executable tree.

use super::registry::{StepRegistry, Substitute};
use super::StoryDefinition;
use crate::contracts::Contract;
use crate::errors::{CycleDetectedError, DeclarationError, ResolveError, StoryError};
use crate::observability::{OutlineNode, TraceSink};
use crate::steps::Step;
use indexmap::IndexMap;
use std::sync::Arc;

/// What serves a slot once resolved.
#[derive(Debug, Clone)]
pub(crate) enum SlotTarget {
    /// A leaf step and the owner recorded as origin of its updates.
    Step { owner: String, step: Arc<dyn Step> },
    /// A nested story.
    Story(Arc<BoundStory>),
}

#[derive(Debug, Clone)]
pub(crate) struct BoundSlot {
    pub name: String,
    /// `Owner.name` of the injected implementation.
    pub substitute: Option<String>,
    pub target: SlotTarget,
}

/// A story whose slots are all resolved.
#[derive(Debug, Clone)]
pub(crate) struct BoundStory {
    pub definition: StoryDefinition,
    pub slots: Vec<BoundSlot>,
    /// The story's own contract merged with those of every nested story.
    pub contract: Contract,
    pub trace_sinks: Vec<Arc<dyn TraceSink>>,
}

impl BoundStory {
    pub fn qualified_name(&self) -> String {
        self.definition.qualified_name()
    }

    pub fn outline(&self) -> Vec<OutlineNode> {
        self.slots
            .iter()
            .map(|slot| OutlineNode {
                name: slot.name.clone(),
                substitute: slot.substitute.clone(),
                children: match &slot.target {
                    SlotTarget::Step { .. } => None,
                    SlotTarget::Story(child) => Some(child.outline()),
                },
            })
            .collect()
    }
}

/// Binding state for one instance.
pub(crate) struct Binder<'a> {
    pub registry: &'a StepRegistry,
    pub substitutes: &'a IndexMap<String, Substitute>,
    pub trace_sinks: &'a [Arc<dyn TraceSink>],
    pub max_depth: usize,
}

impl Binder<'_> {
    /// Binds `definition`, resolving own stories recursively.
    pub fn bind(&self, definition: &StoryDefinition) -> Result<BoundStory, StoryError> {
        self.bind_inner(definition, &mut Vec::new())
    }

    fn bind_inner(
        &self,
        definition: &StoryDefinition,
        stack: &mut Vec<String>,
    ) -> Result<BoundStory, StoryError> {
        let qualified = definition.qualified_name();

        if definition.owner != self.registry.owner() {
            return Err(DeclarationError::new(format!(
                "Story '{qualified}' is registered on '{}'",
                self.registry.owner()
            ))
            .with_story(qualified)
            .into());
        }
        if let Some(pos) = stack.iter().position(|name| *name == qualified) {
            let mut cycle_path = stack[pos..].to_vec();
            cycle_path.push(qualified);
            return Err(CycleDetectedError::new(cycle_path).into());
        }
        if stack.len() >= self.max_depth {
            return Err(DeclarationError::new(format!(
                "Story '{qualified}' is nested deeper than {} levels",
                self.max_depth
            ))
            .with_story(qualified)
            .into());
        }

        stack.push(qualified.clone());
        let slots = definition
            .slots
            .iter()
            .map(|slot| self.resolve(&qualified, slot, stack))
            .collect::<Result<Vec<_>, _>>();
        stack.pop();
        let slots = slots?;

        let mut contract = definition.contract.clone();
        for slot in &slots {
            if let SlotTarget::Story(child) = &slot.target {
                contract
                    .merge(&child.contract)
                    .map_err(|err| err.with_story(qualified.clone()))?;
            }
        }

        Ok(BoundStory {
            definition: definition.clone(),
            slots,
            contract,
            trace_sinks: self.trace_sinks.to_vec(),
        })
    }

    /// Resolves one slot: substitute, then own step, then own story.
    fn resolve(
        &self,
        story: &str,
        slot: &str,
        stack: &mut Vec<String>,
    ) -> Result<BoundSlot, StoryError> {
        if let Some(substitute) = self.substitutes.get(slot) {
            let (label, target) = match substitute {
                Substitute::Story(injected) => (
                    injected.qualified_name(),
                    SlotTarget::Story(injected.bound()),
                ),
                Substitute::Step { owner, step } => (
                    format!("{owner}.{slot}"),
                    SlotTarget::Step {
                        owner: owner.clone(),
                        step: Arc::clone(step),
                    },
                ),
            };
            return Ok(BoundSlot {
                name: slot.to_string(),
                substitute: Some(label),
                target,
            });
        }

        if let Some(step) = self.registry.get_step(slot) {
            return Ok(BoundSlot {
                name: slot.to_string(),
                substitute: None,
                target: SlotTarget::Step {
                    owner: self.registry.owner().to_string(),
                    step,
                },
            });
        }

        if let Some(definition) = self.registry.get_story(slot) {
            let child = self.bind_inner(definition, stack)?;
            return Ok(BoundSlot {
                name: slot.to_string(),
                substitute: None,
                target: SlotTarget::Story(Arc::new(child)),
            });
        }

        Err(ResolveError::UnknownSlot {
            story: story.to_string(),
            slot: slot.to_string(),
        }
        .into())
    }
}
