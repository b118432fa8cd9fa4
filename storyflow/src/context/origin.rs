//! Provenance of context keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a context key came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    /// Passed as an argument of the top-level call.
    Argument,
    /// Set by a step of some owner type.
    Step {
        /// The type that owns the step.
        owner: String,
        /// The step name.
        step: String,
    },
}

impl Origin {
    /// Creates a step origin.
    #[must_use]
    pub fn step(owner: impl Into<String>, step: impl Into<String>) -> Self {
        Self::Step {
            owner: owner.into(),
            step: step.into(),
        }
    }

    /// Returns true if the key was a call argument.
    #[must_use]
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argument => write!(f, "Story argument"),
            Self::Step { owner, step } => write!(f, "Set by {owner}.{step}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_display() {
        assert_eq!(Origin::Argument.to_string(), "Story argument");
        assert_eq!(
            Origin::step("SimpleCtxRepr", "one").to_string(),
            "Set by SimpleCtxRepr.one"
        );
    }

    #[test]
    fn test_origin_serialize() {
        let json = serde_json::to_value(Origin::step("Simple", "two")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "step", "owner": "Simple", "step": "two"})
        );

        let json = serde_json::to_string(&Origin::Argument).unwrap();
        assert_eq!(json, r#"{"kind":"argument"}"#);
    }
}
