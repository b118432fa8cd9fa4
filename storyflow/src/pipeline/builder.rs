//! Story builder with validation.

use super::StoryDefinition;
use crate::contracts::Contract;
use crate::errors::DeclarationError;
use std::collections::HashSet;

/// Builder for story definitions.
#[derive(Debug, Clone)]
pub struct StoryBuilder {
    owner: String,
    name: String,
    arguments: Vec<String>,
    slots: Vec<String>,
    contract: Contract,
}

impl StoryBuilder {
    /// Creates a builder for `owner.name`.
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            arguments: Vec::new(),
            slots: Vec::new(),
            contract: Contract::new(),
        }
    }

    /// Declares one argument.
    #[must_use]
    pub fn argument(mut self, name: impl Into<String>) -> Self {
        self.arguments.push(name.into());
        self
    }

    /// Declares several arguments, in call order.
    #[must_use]
    pub fn arguments<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(names.into_iter().map(Into::into));
        self
    }

    /// Appends one slot.
    #[must_use]
    pub fn slot(mut self, name: impl Into<String>) -> Self {
        self.slots.push(name.into());
        self
    }

    /// Appends several slots, in execution order.
    #[must_use]
    pub fn slots<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots.extend(names.into_iter().map(Into::into));
        self
    }

    /// Attaches a contract.
    #[must_use]
    pub fn contract(mut self, contract: Contract) -> Self {
        self.contract = contract;
        self
    }

    /// Builds the definition.
    ///
    /// # Errors
    ///
    /// Returns `DeclarationError` for empty names and for duplicated
    /// argument names. A slot may be listed more than once.
    pub fn build(self) -> Result<StoryDefinition, DeclarationError> {
        let qualified = format!("{}.{}", self.owner, self.name);

        if self.owner.trim().is_empty() || self.name.trim().is_empty() {
            return Err(DeclarationError::new("Story owner and name must not be empty")
                .with_story(qualified));
        }
        if self.slots.iter().any(|s| s.trim().is_empty()) {
            return Err(DeclarationError::new("Slot names must not be empty").with_story(qualified));
        }
        if let Some(arg) = first_duplicate(&self.arguments) {
            return Err(DeclarationError::new(format!(
                "Story '{qualified}' declares argument '{arg}' more than once"
            ))
            .with_story(qualified));
        }

        Ok(StoryDefinition {
            owner: self.owner,
            name: self.name,
            arguments: self.arguments,
            slots: self.slots,
            contract: self.contract,
        })
    }
}

fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .find(|name| !seen.insert(name.as_str()))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::converters;

    #[test]
    fn test_build() {
        let def = StoryBuilder::new("Simple", "x")
            .arguments(["a", "b"])
            .slots(["one", "two"])
            .slot("three")
            .contract(Contract::new().field("a", converters::integer()))
            .build()
            .unwrap();

        assert_eq!(def.qualified_name(), "Simple.x");
        assert_eq!(def.arguments, vec!["a", "b"]);
        assert_eq!(def.slots, vec!["one", "two", "three"]);
        assert!(def.contract.contains("a"));
        assert!(def.has_slot("two"));
    }

    #[test]
    fn test_build_empty_story() {
        let def = StoryBuilder::new("Empty", "x").build().unwrap();
        assert!(def.is_empty());
    }

    #[test]
    fn test_repeated_slot() {
        let def = StoryBuilder::new("Simple", "x")
            .slots(["one", "two", "one"])
            .build()
            .unwrap();
        assert_eq!(def.slots, vec!["one", "two", "one"]);
    }

    #[test]
    fn test_duplicate_argument() {
        let err = StoryBuilder::new("Simple", "x")
            .arguments(["a", "a"])
            .build()
            .unwrap_err();
        assert!(err.message.contains("argument 'a'"));
    }

    #[test]
    fn test_empty_names() {
        assert!(StoryBuilder::new("", "x").build().is_err());
        assert!(StoryBuilder::new("Simple", "x").slot(" ").build().is_err());
    }
}
