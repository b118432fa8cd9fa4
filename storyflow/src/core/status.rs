//! Step status recorded by execution traces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a slot ended during one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum StepStatus {
    /// Entered but not finished yet.
    Pending,
    /// Ran to completion and the call continued.
    Completed,
    /// Aborted the call.
    Failed,
    /// Ended its enclosing story.
    Skipped,
    /// Produced the final value of the call.
    Returned(serde_json::Value),
}

impl Default for StepStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
            Self::Returned(_) => write!(f, "returned"),
        }
    }
}

impl StepStatus {
    /// Returns true if the status is final.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns the annotation used by trace rendering, if any.
    ///
    /// Completed and pending slots are not annotated.
    #[must_use]
    pub fn annotation(&self) -> Option<String> {
        match self {
            Self::Pending | Self::Completed => None,
            Self::Failed => Some("failed".to_string()),
            Self::Skipped => Some("skipped".to_string()),
            Self::Returned(value) => Some(format!("returned: {value}")),
        }
    }
}
