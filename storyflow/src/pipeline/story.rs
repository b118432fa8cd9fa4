//! Bound story handles.

use super::bind::BoundStory;
use super::executor::{execute, Terminal};
use super::{Arguments, RunResult};
use crate::config::StoryConfig;
use crate::errors::{AbortError, StoryError};
use crate::events::EventSink;
use crate::observability::render_outline;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

struct StoryInner {
    bound: Arc<BoundStory>,
    config: StoryConfig,
    event_sink: Option<Arc<dyn EventSink>>,
}

/// A story with every slot resolved, ready to be called.
///
/// Cloning is cheap. Every call seeds its own context, so one story can be
/// called from several threads at once.
#[derive(Clone)]
pub struct Story {
    inner: Arc<StoryInner>,
}

impl Story {
    pub(crate) fn new(
        bound: BoundStory,
        config: StoryConfig,
        event_sink: Option<Arc<dyn EventSink>>,
    ) -> Self {
        Self {
            inner: Arc::new(StoryInner {
                bound: Arc::new(bound),
                config,
                event_sink,
            }),
        }
    }

    pub(crate) fn bound(&self) -> Arc<BoundStory> {
        Arc::clone(&self.inner.bound)
    }

    /// Returns the story name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.bound.definition.name
    }

    /// Returns the owner name.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.inner.bound.definition.owner
    }

    /// Returns `Owner.name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        self.inner.bound.qualified_name()
    }

    /// Returns the declared argument names.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.inner.bound.definition.arguments
    }

    /// Returns the configuration applied to calls.
    #[must_use]
    pub fn config(&self) -> &StoryConfig {
        &self.inner.config
    }

    /// Calls the story, returning the final value.
    ///
    /// `Ok(None)` means no step returned a value.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Abort` when a step aborts, carrying the context
    /// as accumulated up to that step. Every other error is a defect in the
    /// story declaration or in the call.
    pub fn call(&self, arguments: impl Into<Arguments>) -> Result<Option<Value>, StoryError> {
        let story = self.qualified_name();
        let bound = arguments.into().bind(&story, self.arguments())?;
        let execution = execute(
            &self.inner.bound,
            &self.inner.config,
            self.inner.event_sink.as_ref(),
            bound,
        )?;
        match execution.terminal {
            Terminal::Succeeded(value) => Ok(value),
            Terminal::Failed { step, reason } => Err(AbortError {
                story,
                step,
                reason,
                context: execution.context,
            }
            .into()),
        }
    }

    /// Calls the story, boxing the outcome.
    ///
    /// # Errors
    ///
    /// Aborts are reported through [`RunResult::is_failure`]; `Err` is only
    /// returned for defects in the story declaration or in the call.
    pub fn run(&self, arguments: impl Into<Arguments>) -> Result<RunResult, StoryError> {
        let story = self.qualified_name();
        let bound = arguments.into().bind(&story, self.arguments())?;
        let execution = execute(
            &self.inner.bound,
            &self.inner.config,
            self.inner.event_sink.as_ref(),
            bound,
        )?;
        Ok(RunResult::new(story, execution))
    }

    /// Renders the resolved structure of the story.
    #[must_use]
    pub fn render(&self) -> String {
        render_outline(&self.qualified_name(), &self.inner.bound.outline())
    }
}

impl fmt::Display for Story {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Story {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Story")
            .field("name", &self.qualified_name())
            .field("arguments", &self.arguments())
            .finish()
    }
}
