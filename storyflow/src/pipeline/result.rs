//! Boxed results of the `run` call convention.

use super::executor::{Execution, Terminal};
use crate::context::Context;
use crate::errors::ValueOfFailureError;
use crate::observability::Trace;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// The outcome of one `run` call.
///
/// Domain aborts end up here as failures; only programmer errors are
/// returned as `Err` by [`Story::run`](super::Story::run).
#[derive(Debug, Clone)]
pub struct RunResult {
    story: String,
    terminal: Terminal,
    context: Context,
    trace: Trace,
}

impl RunResult {
    pub(crate) fn new(story: String, execution: Execution) -> Self {
        Self {
            story,
            terminal: execution.terminal,
            context: execution.context,
            trace: execution.trace,
        }
    }

    /// Returns true if no step aborted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.terminal, Terminal::Succeeded(_))
    }

    /// Returns true if a step aborted.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Returns the final value; `None` when no step returned one.
    ///
    /// # Errors
    ///
    /// Returns `ValueOfFailureError` when the call failed.
    pub fn value(&self) -> Result<Option<&Value>, ValueOfFailureError> {
        match &self.terminal {
            Terminal::Succeeded(value) => Ok(value.as_ref()),
            Terminal::Failed { step, .. } => Err(ValueOfFailureError {
                story: self.story.clone(),
                step: step.clone(),
            }),
        }
    }

    /// Consumes the result and returns the final value.
    ///
    /// # Errors
    ///
    /// Returns `ValueOfFailureError` when the call failed.
    pub fn into_value(self) -> Result<Option<Value>, ValueOfFailureError> {
        match self.terminal {
            Terminal::Succeeded(value) => Ok(value),
            Terminal::Failed { step, .. } => Err(ValueOfFailureError {
                story: self.story,
                step,
            }),
        }
    }

    /// Returns the context as accumulated when the call ended.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Returns true if the call failed at the step named `step`.
    #[must_use]
    pub fn failed_on(&self, step: &str) -> bool {
        self.failed_step() == Some(step)
    }

    /// Returns true if the call failed with exactly `reason`.
    #[must_use]
    pub fn failed_because(&self, reason: &str) -> bool {
        self.reason() == Some(reason)
    }

    /// Returns the slot name of the aborting step.
    #[must_use]
    pub fn failed_step(&self) -> Option<&str> {
        match &self.terminal {
            Terminal::Failed { step, .. } => Some(step),
            Terminal::Succeeded(_) => None,
        }
    }

    /// Returns the abort reason, if one was given.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match &self.terminal {
            Terminal::Failed { reason, .. } => reason.as_deref(),
            Terminal::Succeeded(_) => None,
        }
    }

    /// Returns the execution trace of the call.
    #[must_use]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Returns the unique id of the call.
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.trace.run_id
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.terminal {
            Terminal::Succeeded(None) => write!(f, "Success()"),
            Terminal::Succeeded(Some(value)) => write!(f, "Success({value})"),
            Terminal::Failed { step, .. } => write!(f, "Failure({step:?})"),
        }
    }
}
