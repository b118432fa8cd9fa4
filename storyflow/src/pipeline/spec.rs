//! Story declarations.

use crate::contracts::Contract;

/// The declared shape of a story: its arguments, its ordered slots and its
/// contract. Slots are names only; they are resolved when a story is bound.
#[derive(Debug, Clone)]
pub struct StoryDefinition {
    /// The type that owns the story.
    pub owner: String,
    /// The story name.
    pub name: String,
    /// Declared argument names, in call order.
    pub arguments: Vec<String>,
    /// Slot names, in execution order.
    pub slots: Vec<String>,
    /// Converters for arguments and step updates.
    pub contract: Contract,
}

impl StoryDefinition {
    /// Returns `Owner.name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner, self.name)
    }

    /// Returns true if the story has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Checks if the story declares a slot.
    #[must_use]
    pub fn has_slot(&self, slot: &str) -> bool {
        self.slots.iter().any(|s| s == slot)
    }
}
