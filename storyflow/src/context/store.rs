//! The append-only story context.

use super::Origin;
use crate::errors::{DuplicateKeyError, MissingKeyError};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::ops::Index;

/// A value held by the context together with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextEntry {
    /// The stored value.
    pub value: serde_json::Value,
    /// Who set it.
    pub origin: Origin,
}

/// The accumulated state of one story call.
///
/// Keys are write-once: writing a key that is already present fails with
/// [`DuplicateKeyError`] and leaves the context untouched. Insertion order
/// is kept and drives the textual rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Context {
    entries: IndexMap<String, ContextEntry>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context holding the call arguments.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKeyError` if two arguments share a name.
    pub fn seed<I, K>(arguments: I) -> Result<Self, DuplicateKeyError>
    where
        I: IntoIterator<Item = (K, serde_json::Value)>,
        K: Into<String>,
    {
        let mut ctx = Self::new();
        for (key, value) in arguments {
            ctx.insert(key.into(), value, Origin::Argument)?;
        }
        Ok(ctx)
    }

    /// Appends all `updates`, recorded as set by `origin`.
    ///
    /// Either every key is added or none is.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKeyError` for the first key already present.
    pub fn extend(
        &mut self,
        updates: IndexMap<String, serde_json::Value>,
        origin: &Origin,
    ) -> Result<(), DuplicateKeyError> {
        if let Some(key) = updates.keys().find(|key| self.entries.contains_key(*key)) {
            return Err(DuplicateKeyError::new(key.as_str()));
        }
        for (key, value) in updates {
            self.entries.insert(
                key,
                ContextEntry {
                    value,
                    origin: origin.clone(),
                },
            );
        }
        Ok(())
    }

    /// Sets a single key.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKeyError` if the key already exists.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
        origin: Origin,
    ) -> Result<(), DuplicateKeyError> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(DuplicateKeyError::new(key));
        }
        self.entries.insert(key, ContextEntry { value, origin });
        Ok(())
    }

    /// Gets a value.
    ///
    /// # Errors
    ///
    /// Returns `MissingKeyError` if the key was never set.
    pub fn get(&self, key: &str) -> Result<&serde_json::Value, MissingKeyError> {
        self.entries
            .get(key)
            .map(|entry| &entry.value)
            .ok_or_else(|| MissingKeyError::new(key))
    }

    /// Gets the origin of a key.
    #[must_use]
    pub fn origin(&self, key: &str) -> Option<&Origin> {
        self.entries.get(key).map(|entry| &entry.origin)
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Returns a plain key to value mapping.
    #[must_use]
    pub fn to_dict(&self) -> IndexMap<String, serde_json::Value> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    /// Returns the context as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(self.to_dict().into_iter().collect())
    }

    /// Renders the provenance description.
    #[must_use]
    pub fn render(&self) -> String {
        super::render::render_context(self)
    }
}

impl Index<&str> for Context {
    type Output = serde_json::Value;

    /// # Panics
    ///
    /// Panics if the key is absent; use [`Context::get`] to handle that case.
    fn index(&self, key: &str) -> &Self::Output {
        &self.entries[key].value
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
