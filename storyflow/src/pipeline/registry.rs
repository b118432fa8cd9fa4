//! Step registries and story instances.
//!
//! A [`StepRegistry`] plays the part of a type that defines steps and
//! stories. An [`Instance`] of it may replace slots with substitutes before
//! its stories are bound.

use super::bind::Binder;
use super::{Story, StoryDefinition};
use crate::config::StoryConfig;
use crate::context::Context;
use crate::core::Outcome;
use crate::errors::{ResolveError, StoryError};
use crate::events::EventSink;
use crate::observability::TraceSink;
use crate::steps::{FnStep, Step};
use indexmap::IndexMap;
use std::sync::Arc;

/// The steps and stories defined by one owner type.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    owner: String,
    steps: IndexMap<String, Arc<dyn Step>>,
    stories: IndexMap<String, StoryDefinition>,
}

impl StepRegistry {
    /// Creates an empty registry for `owner`.
    #[must_use]
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            steps: IndexMap::new(),
            stories: IndexMap::new(),
        }
    }

    /// Registers a step body.
    #[must_use]
    pub fn step<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Context) -> Outcome + Send + Sync + 'static,
    {
        let name = name.into();
        let step = Arc::new(FnStep::new(name.clone(), func));
        self.step_impl(name, step)
    }

    /// Registers a step implementation.
    #[must_use]
    pub fn step_impl(mut self, name: impl Into<String>, step: Arc<dyn Step>) -> Self {
        self.steps.insert(name.into(), step);
        self
    }

    /// Replaces a registered step with `wrapper(step)`.
    ///
    /// Unknown names leave the registry unchanged.
    #[must_use]
    pub fn wrap_step<W>(mut self, name: &str, wrapper: W) -> Self
    where
        W: FnOnce(Arc<dyn Step>) -> Arc<dyn Step>,
    {
        if let Some(step) = self.steps.get_mut(name) {
            *step = wrapper(Arc::clone(step));
        }
        self
    }

    /// Registers a story definition under its name.
    #[must_use]
    pub fn story(mut self, definition: StoryDefinition) -> Self {
        self.stories.insert(definition.name.clone(), definition);
        self
    }

    /// Returns the owner name.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns a registered step.
    #[must_use]
    pub fn get_step(&self, name: &str) -> Option<Arc<dyn Step>> {
        self.steps.get(name).cloned()
    }

    /// Returns a registered story definition.
    #[must_use]
    pub fn get_story(&self, name: &str) -> Option<&StoryDefinition> {
        self.stories.get(name)
    }

    /// Returns the registered story names.
    pub fn story_names(&self) -> impl Iterator<Item = &str> {
        self.stories.keys().map(String::as_str)
    }

    /// Starts an instance with no substitutes.
    #[must_use]
    pub fn instance(&self) -> Instance {
        Instance::new(self.clone())
    }
}

/// A replacement for one slot.
#[derive(Debug, Clone)]
pub enum Substitute {
    /// A story bound on another instance.
    Story(Story),
    /// A leaf step defined by another owner.
    Step {
        /// The owner recorded as origin of the step's updates.
        owner: String,
        /// The step implementation.
        step: Arc<dyn Step>,
    },
}

impl Substitute {
    /// Creates a leaf substitute from a closure.
    pub fn step<F>(owner: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Context) -> Outcome + Send + Sync + 'static,
    {
        let owner = owner.into();
        Self::Step {
            step: Arc::new(FnStep::new(owner.clone(), func)),
            owner,
        }
    }
}

impl From<Story> for Substitute {
    fn from(story: Story) -> Self {
        Self::Story(story)
    }
}

/// A registry plus the substitutes, configuration and sinks of one
/// constructed object.
#[derive(Debug, Clone)]
pub struct Instance {
    registry: StepRegistry,
    substitutes: IndexMap<String, Substitute>,
    config: StoryConfig,
    event_sink: Option<Arc<dyn EventSink>>,
    trace_sinks: Vec<Arc<dyn TraceSink>>,
}

impl Instance {
    fn new(registry: StepRegistry) -> Self {
        Self {
            registry,
            substitutes: IndexMap::new(),
            config: StoryConfig::default(),
            event_sink: None,
            trace_sinks: Vec::new(),
        }
    }

    /// Serves `slot` with `substitute` in every story of this instance.
    #[must_use]
    pub fn inject(mut self, slot: impl Into<String>, substitute: impl Into<Substitute>) -> Self {
        self.substitutes.insert(slot.into(), substitute.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: StoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets an event sink used instead of the process-wide one.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Adds a sink receiving the trace of every call that enters a story of
    /// this instance.
    #[must_use]
    pub fn with_trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace_sinks.push(sink);
        self
    }

    /// Binds a story, resolving every slot once.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError` for unknown stories, slots or substitutes,
    /// `CycleDetectedError` for self-containing stories and
    /// `DeclarationError` for owner mismatches or excessive nesting.
    pub fn story(&self, name: &str) -> Result<Story, StoryError> {
        let definition =
            self.registry
                .get_story(name)
                .ok_or_else(|| ResolveError::UnknownStory {
                    owner: self.registry.owner().to_string(),
                    name: name.to_string(),
                })?;

        if let Some(slot) = self.substitutes.keys().find(|slot| {
            !self
                .registry
                .stories
                .values()
                .any(|story| story.has_slot(slot))
        }) {
            return Err(ResolveError::UnknownSubstitute {
                owner: self.registry.owner().to_string(),
                slot: slot.clone(),
            }
            .into());
        }

        let binder = Binder {
            registry: &self.registry,
            substitutes: &self.substitutes,
            trace_sinks: &self.trace_sinks,
            max_depth: self.config.max_depth,
        };
        let bound = binder.bind(definition)?;
        Ok(Story::new(
            bound,
            self.config.clone(),
            self.event_sink.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::StoryBuilder;
    use crate::steps::NoOpStep;

    fn registry() -> StepRegistry {
        StepRegistry::new("Shop")
            .step("one", |_ctx: &Context| Outcome::next())
            .step_impl("two", Arc::new(NoOpStep))
            .story(StoryBuilder::new("Shop", "buy").slots(["one", "two"]).build().unwrap())
            .story(StoryBuilder::new("Shop", "outer").slots(["buy", "one"]).build().unwrap())
    }

    #[test]
    fn test_registry_lookup() {
        let registry = registry();
        assert_eq!(registry.owner(), "Shop");
        assert!(registry.get_step("one").is_some());
        assert!(registry.get_step("buy").is_none());
        assert_eq!(registry.story_names().collect::<Vec<_>>(), vec!["buy", "outer"]);
    }

    #[test]
    fn test_bind_nested_story() {
        let story = registry().instance().story("outer").unwrap();
        assert_eq!(story.render(), "Shop.outer\n  buy\n    one\n    two\n  one");
    }

    #[test]
    fn test_unknown_story() {
        let err = registry().instance().story("sell").unwrap_err();
        assert!(matches!(
            err,
            StoryError::Resolve(ResolveError::UnknownStory { ref name, .. }) if name == "sell"
        ));
    }

    #[test]
    fn test_unknown_slot() {
        let registry = registry().story(StoryBuilder::new("Shop", "bad").slot("three").build().unwrap());
        let err = registry.instance().story("bad").unwrap_err();
        assert!(matches!(
            err,
            StoryError::Resolve(ResolveError::UnknownSlot { ref slot, .. }) if slot == "three"
        ));
    }

    #[test]
    fn test_unknown_substitute() {
        let err = registry()
            .instance()
            .inject("nowhere", Substitute::step("Other", |_ctx: &Context| Outcome::next()))
            .story("buy")
            .unwrap_err();
        assert!(matches!(
            err,
            StoryError::Resolve(ResolveError::UnknownSubstitute { ref slot, .. }) if slot == "nowhere"
        ));
    }

    #[test]
    fn test_step_substitute_label() {
        let story = registry()
            .instance()
            .inject("two", Substitute::step("Other", |_ctx: &Context| Outcome::next()))
            .story("buy")
            .unwrap();
        assert_eq!(story.render(), "Shop.buy\n  one\n  two (Other.two)");
    }

    #[test]
    fn test_cycle_detected() {
        let registry = StepRegistry::new("Loop")
            .story(StoryBuilder::new("Loop", "a").slot("b").build().unwrap())
            .story(StoryBuilder::new("Loop", "b").slot("a").build().unwrap());
        let err = registry.instance().story("a").unwrap_err();
        match err {
            StoryError::CycleDetected(cycle) => {
                assert_eq!(cycle.cycle_path, vec!["Loop.a", "Loop.b", "Loop.a"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_owner_mismatch() {
        let registry =
            StepRegistry::new("Shop").story(StoryBuilder::new("Bank", "pay").build().unwrap());
        let err = registry.instance().story("pay").unwrap_err();
        assert!(matches!(err, StoryError::Declaration(_)));
    }

    #[test]
    fn test_max_depth() {
        let err = registry()
            .instance()
            .with_config(StoryConfig::default().with_max_depth(1))
            .story("outer")
            .unwrap_err();
        assert!(matches!(err, StoryError::Declaration(ref e) if e.message.contains("deeper")));
    }
}
