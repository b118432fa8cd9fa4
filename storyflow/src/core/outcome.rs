//! Step outcome type with factory methods.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The signal a step body returns to the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Outcome {
    /// The step succeeded; the updates are merged into the context.
    Next(IndexMap<String, serde_json::Value>),
    /// The step failed; the whole call terminates.
    Abort(Option<String>),
    /// The step produced the final value of the whole call.
    Return(serde_json::Value),
    /// The innermost enclosing story ends here; its parent continues.
    ScopeEnd,
}

impl Default for Outcome {
    fn default() -> Self {
        Self::next()
    }
}

impl Outcome {
    /// Creates a successful outcome with no updates.
    #[must_use]
    pub fn next() -> Self {
        Self::Next(IndexMap::new())
    }

    /// Creates a successful outcome that sets the given keys.
    #[must_use]
    pub fn next_with<I, K>(updates: I) -> Self
    where
        I: IntoIterator<Item = (K, serde_json::Value)>,
        K: Into<String>,
    {
        Self::Next(updates.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Creates a successful outcome setting a single key.
    #[must_use]
    pub fn next_value(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self::next_with([(key.into(), value.into())])
    }

    /// Creates an abort with no reason.
    #[must_use]
    pub fn abort() -> Self {
        Self::Abort(None)
    }

    /// Creates an abort with a reason.
    #[must_use]
    pub fn abort_because(reason: impl Into<String>) -> Self {
        Self::Abort(Some(reason.into()))
    }

    /// Creates a final value for the whole call.
    #[must_use]
    pub fn returning(value: impl Into<serde_json::Value>) -> Self {
        Self::Return(value.into())
    }

    /// Ends the innermost enclosing story.
    #[must_use]
    pub fn skip() -> Self {
        Self::ScopeEnd
    }

    /// Returns the variant name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Next(_) => "next",
            Self::Abort(_) => "abort",
            Self::Return(_) => "return",
            Self::ScopeEnd => "scope_end",
        }
    }

    /// Returns true if the call continues after this outcome.
    #[must_use]
    pub fn is_next(&self) -> bool {
        matches!(self, Self::Next(_))
    }

    /// Returns true if this outcome fails the call.
    #[must_use]
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Abort(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next(updates) => {
                let fields: Vec<String> =
                    updates.iter().map(|(k, v)| format!("{k}={v}")).collect();
                write!(f, "Next({})", fields.join(", "))
            }
            Self::Abort(None) => write!(f, "Abort()"),
            Self::Abort(Some(reason)) => write!(f, "Abort({reason:?})"),
            Self::Return(value) => write!(f, "Return({value})"),
            Self::ScopeEnd => write!(f, "ScopeEnd()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_next_output() {
        let outcome = Outcome::next_with([("foo", json!("bar")), ("baz", json!(2))]);
        assert!(outcome.is_next());
        assert_eq!(outcome.kind(), "next");
    }

    #[test]
    fn test_abort_output() {
        assert!(Outcome::abort().is_abort());
        assert_eq!(
            Outcome::abort_because("no money"),
            Outcome::Abort(Some("no money".to_string()))
        );
    }

    #[test]
    fn test_default_is_empty_next() {
        assert_eq!(Outcome::default(), Outcome::Next(IndexMap::new()));
    }

    #[test]
    fn test_serialization() {
        let outcome = Outcome::returning(-1);
        let json = serde_json::to_string(&outcome).unwrap();
        let deserialized: Outcome = serde_json::from_str(&json).unwrap();

        assert_eq!(outcome, deserialized);
    }
}
