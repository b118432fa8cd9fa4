//! Error types for the storyflow engine.
//!
//! Every variant of [`StoryError`] except [`AbortError`] is a programmer
//! error: a defect in a story declaration or in a call site. Domain aborts
//! produced by step bodies only surface as [`AbortError`] through the strict
//! call convention.

use crate::context::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for storyflow operations.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A key was written to a context that already holds it.
    #[error("{0}")]
    DuplicateKey(#[from] DuplicateKeyError),

    /// A key was read from a context that does not hold it.
    #[error("{0}")]
    MissingKey(#[from] MissingKeyError),

    /// A contract converter rejected a value.
    #[error("{0}")]
    Contract(#[from] ContractError),

    /// A story was called with arguments that do not match its declaration.
    #[error("{0}")]
    Arity(#[from] ArityError),

    /// A step aborted the story (strict call convention only).
    #[error("{0}")]
    Abort(#[from] AbortError),

    /// A slot could not be resolved to an implementation.
    #[error("{0}")]
    Resolve(#[from] ResolveError),

    /// A story references itself through its slots.
    #[error("{0}")]
    CycleDetected(#[from] CycleDetectedError),

    /// A story declaration is malformed.
    #[error("{0}")]
    Declaration(#[from] DeclarationError),

    /// The value of a failed run result was requested.
    #[error("{0}")]
    ValueOfFailure(#[from] ValueOfFailureError),
}

impl StoryError {
    /// Returns true for errors raised by the strict convention on a domain abort.
    #[must_use]
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Abort(_))
    }

    /// Returns the abort error, if this is one.
    #[must_use]
    pub fn as_abort(&self) -> Option<&AbortError> {
        match self {
            Self::Abort(err) => Some(err),
            _ => None,
        }
    }

    /// Describes the error as structured diagnostics.
    #[must_use]
    pub fn error_info(&self) -> ContractErrorInfo {
        let (code, hint) = match self {
            Self::DuplicateKey(_) => (
                codes::DUPLICATE_KEY,
                "Context keys are write-once. Rename the key or stop setting it twice.",
            ),
            Self::MissingKey(_) => (
                codes::MISSING_KEY,
                "Set the key in an earlier step or pass it as a story argument.",
            ),
            Self::Contract(_) => (
                codes::CONTRACT,
                "Pass a value the contract converter accepts.",
            ),
            Self::Arity(_) => (
                codes::ARITY,
                "Call the story with exactly its declared arguments.",
            ),
            Self::Abort(_) => (
                codes::ABORT,
                "Use `run` to inspect the failure without an error.",
            ),
            Self::Resolve(_) => (
                codes::RESOLVE,
                "Register a step or story under the slot name, or inject a substitute.",
            ),
            Self::CycleDetected(_) => (
                codes::CYCLE,
                "Remove the slot that makes the story contain itself.",
            ),
            Self::Declaration(_) => (codes::DECLARATION, "Fix the story declaration."),
            Self::ValueOfFailure(_) => (
                codes::VALUE_OF_FAILURE,
                "Check `is_success` before reading the value.",
            ),
        };
        ContractErrorInfo::new(code, self.to_string()).with_fix_hint(hint)
    }
}

/// Metadata about an error for better diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ContractErrorInfo {
    /// Error code (e.g., "STORY-003-CONTRACT").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    pub fix_hint: Option<String>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl ContractErrorInfo {
    /// Creates a new error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
            context: HashMap::new(),
        }
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("code".to_string(), serde_json::json!(self.code));
        map.insert("summary".to_string(), serde_json::json!(self.summary));
        if let Some(ref hint) = self.fix_hint {
            map.insert("fix_hint".to_string(), serde_json::json!(hint));
        }
        if !self.context.is_empty() {
            map.insert("context".to_string(), serde_json::json!(self.context));
        }
        map
    }
}

/// Stable error codes.
pub mod codes {
    /// Duplicate context key.
    pub const DUPLICATE_KEY: &str = "STORY-001-DUPLICATE_KEY";
    /// Missing context key.
    pub const MISSING_KEY: &str = "STORY-002-MISSING_KEY";
    /// Contract violation.
    pub const CONTRACT: &str = "STORY-003-CONTRACT";
    /// Wrong call arguments.
    pub const ARITY: &str = "STORY-004-ARITY";
    /// Domain abort.
    pub const ABORT: &str = "STORY-005-ABORT";
    /// Unresolvable slot.
    pub const RESOLVE: &str = "STORY-006-RESOLVE";
    /// Self-referencing story.
    pub const CYCLE: &str = "STORY-007-CYCLE";
    /// Malformed declaration.
    pub const DECLARATION: &str = "STORY-008-DECLARATION";
    /// Value read from a failure.
    pub const VALUE_OF_FAILURE: &str = "STORY-009-VALUE_OF_FAILURE";
}

/// Error raised when writing an existing key into a context.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Context already contains key '{key}'")]
pub struct DuplicateKeyError {
    /// The conflicting key.
    pub key: String,
}

impl DuplicateKeyError {
    /// Creates a new duplicate key error.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Error raised when reading an absent key from a context.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Context has no key '{key}'")]
pub struct MissingKeyError {
    /// The missing key.
    pub key: String,
}

impl MissingKeyError {
    /// Creates a new missing key error.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Error raised when a contract converter rejects a value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Contract violation for '{key}': {message}")]
pub struct ContractError {
    /// The offending key.
    pub key: String,
    /// The converter's message.
    pub message: String,
}

impl ContractError {
    /// Creates a new contract error.
    #[must_use]
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Errors raised when call arguments do not match a story's declaration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArityError {
    /// Wrong number of positional arguments.
    #[error("Story '{story}' takes {expected} argument(s) but {given} were given")]
    Count {
        /// The story name.
        story: String,
        /// Declared argument count.
        expected: usize,
        /// Given argument count.
        given: usize,
    },

    /// A keyword that the story does not declare.
    #[error("Story '{story}' got an unexpected keyword argument '{key}'")]
    UnknownKeyword {
        /// The story name.
        story: String,
        /// The unknown keyword.
        key: String,
    },

    /// A declared argument missing from the keywords.
    #[error("Story '{story}' is missing argument '{key}'")]
    MissingKeyword {
        /// The story name.
        story: String,
        /// The missing argument.
        key: String,
    },

    /// Positional and keyword arguments in the same call.
    #[error("Story '{story}' accepts either positional or keyword arguments, not both")]
    Mixed {
        /// The story name.
        story: String,
    },
}

/// Error raised by the strict call convention when a step aborts.
#[derive(Debug, Clone, Error)]
#[error("Story '{story}' aborted at step '{step}'{}", .reason.as_ref().map(|r| format!(": {r}")).unwrap_or_default())]
pub struct AbortError {
    /// Qualified name of the called story.
    pub story: String,
    /// Slot name of the step that aborted.
    pub step: String,
    /// Abort reason, if the step gave one.
    pub reason: Option<String>,
    /// Context as accumulated up to the aborting step.
    pub context: Context,
}

/// Errors raised while resolving slot names to implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No story with that name is registered.
    #[error("'{owner}' has no story '{name}'")]
    UnknownStory {
        /// The registry owner.
        owner: String,
        /// The requested story.
        name: String,
    },

    /// A slot that names neither a step, a story nor a substitute.
    #[error("Story '{story}' has slot '{slot}' with no step, story or substitute behind it")]
    UnknownSlot {
        /// Qualified story name.
        story: String,
        /// The slot name.
        slot: String,
    },

    /// A substitute injected for a slot that none of the owner's stories declares.
    #[error("'{owner}' has no story with a slot '{slot}' to inject into")]
    UnknownSubstitute {
        /// The registry owner.
        owner: String,
        /// The injected slot name.
        slot: String,
    },
}

/// Error raised when a story contains itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Cycle detected in story: {}", .cycle_path.join(" -> "))]
pub struct CycleDetectedError {
    /// The story names forming the cycle.
    pub cycle_path: Vec<String>,
}

impl CycleDetectedError {
    /// Creates a new cycle detected error.
    #[must_use]
    pub fn new(cycle_path: Vec<String>) -> Self {
        Self { cycle_path }
    }
}

/// Error raised when a story declaration is malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct DeclarationError {
    /// The error message.
    pub message: String,
    /// The story the error refers to, when known.
    pub story: Option<String>,
}

impl DeclarationError {
    /// Creates a new declaration error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            story: None,
        }
    }

    /// Sets the story involved.
    #[must_use]
    pub fn with_story(mut self, story: impl Into<String>) -> Self {
        self.story = Some(story.into());
        self
    }
}

/// Error raised when the value of a failed run result is requested.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Story '{story}' failed at step '{step}' and has no value")]
pub struct ValueOfFailureError {
    /// Qualified story name.
    pub story: String,
    /// The step that aborted.
    pub step: String,
}
