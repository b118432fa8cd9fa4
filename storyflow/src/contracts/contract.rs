//! Per-story argument contracts.

use crate::errors::{ContractError, DeclarationError};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Signature of a converter body.
pub type ConvertFn = dyn Fn(&serde_json::Value) -> Result<serde_json::Value, String> + Send + Sync;

/// A named value converter.
///
/// A converter either returns the converted value or an error message.
#[derive(Clone)]
pub struct Converter {
    name: String,
    func: Arc<ConvertFn>,
}

impl Converter {
    /// Creates a converter from a closure.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&serde_json::Value) -> Result<serde_json::Value, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the converter.
    ///
    /// # Errors
    ///
    /// Returns the converter's message when the value is rejected.
    pub fn convert(&self, value: &serde_json::Value) -> Result<serde_json::Value, String> {
        (self.func)(value)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter").field("name", &self.name).finish()
    }
}

/// A mapping from context key to converter.
#[derive(Debug, Clone, Default)]
pub struct Contract {
    fields: IndexMap<String, Converter>,
}

impl Contract {
    /// Creates an empty contract.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, converter: Converter) -> Self {
        self.fields.insert(key.into(), converter);
        self
    }

    /// Returns the covered keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Checks if the contract covers a key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns the number of covered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the contract covers nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the contract restricted to `keys`.
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn shrink<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut fields = IndexMap::new();
        for key in keys {
            if let Some(converter) = self.fields.get(key) {
                fields.insert(key.to_string(), converter.clone());
            }
        }
        Self { fields }
    }

    /// Adds the fields of `other` that are not covered yet.
    ///
    /// A key covered by both must use converters of the same name.
    ///
    /// # Errors
    ///
    /// Returns `DeclarationError` for a key declared with two different
    /// converters.
    pub fn merge(&mut self, other: &Self) -> Result<(), DeclarationError> {
        for (key, converter) in &other.fields {
            match self.fields.get(key) {
                Some(known) if known.name() != converter.name() => {
                    return Err(DeclarationError::new(format!(
                        "Contract field '{key}' is declared as both '{}' and '{}'",
                        known.name(),
                        converter.name()
                    )));
                }
                Some(_) => {}
                None => {
                    self.fields.insert(key.clone(), converter.clone());
                }
            }
        }
        Ok(())
    }

    /// Converts a single value if the contract covers its key.
    ///
    /// Returns `None` for uncovered keys.
    #[must_use]
    pub fn convert(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> Option<Result<serde_json::Value, ContractError>> {
        self.fields.get(key).map(|converter| {
            converter
                .convert(value)
                .map_err(|message| ContractError::new(key, message))
        })
    }

    /// Validates `raw` against the contract shrunk to `scope_keys`.
    ///
    /// Checked keys are replaced by their converted values; every other key
    /// passes through unchanged. Keys absent from `raw` are not checked.
    ///
    /// # Errors
    ///
    /// Returns `ContractError` for the first rejected key; nothing is
    /// returned for the keys converted before it.
    pub fn validate<'a>(
        &self,
        scope_keys: impl IntoIterator<Item = &'a str>,
        raw: &IndexMap<String, serde_json::Value>,
    ) -> Result<IndexMap<String, serde_json::Value>, ContractError> {
        let scoped = self.shrink(scope_keys);
        raw.iter()
            .map(|(key, value)| -> Result<(String, serde_json::Value), ContractError> {
                let converted = match scoped.convert(key, value) {
                    Some(result) => result?,
                    None => value.clone(),
                };
                Ok((key.clone(), converted))
            })
            .collect()
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return write!(f, "Contract()");
        }
        write!(f, "Contract:")?;
        for (key, converter) in &self.fields {
            write!(f, "\n  {key}: {}", converter.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::converters;
    use serde_json::json;

    fn raw(pairs: &[(&str, serde_json::Value)]) -> IndexMap<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    fn contract() -> Contract {
        Contract::new()
            .field("a", converters::integer())
            .field("b", converters::integer())
            .field("name", converters::string())
    }

    #[test]
    fn test_validate_converts_checked_keys() {
        let result = contract()
            .validate(["a", "b"], &raw(&[("a", json!("2")), ("b", json!(3))]))
            .unwrap();

        assert_eq!(result, raw(&[("a", json!(2)), ("b", json!(3))]));
    }

    #[test]
    fn test_validate_passes_through_uncovered_keys() {
        let result = contract()
            .validate(["a", "other"], &raw(&[("a", json!(1)), ("other", json!("x"))]))
            .unwrap();

        assert_eq!(result["other"], json!("x"));
    }

    #[test]
    fn test_validate_is_scoped() {
        // "b" is covered but outside the scope, so the bad value passes
        let result = contract()
            .validate(["a"], &raw(&[("a", json!(1)), ("b", json!("nope"))]))
            .unwrap();

        assert_eq!(result["b"], json!("nope"));
    }

    #[test]
    fn test_validate_reports_key() {
        let err = contract()
            .validate(["a", "b"], &raw(&[("a", json!(1)), ("b", json!("nope"))]))
            .unwrap_err();

        assert_eq!(err.key, "b");
        assert_eq!(err.message, "Invalid value");
    }

    #[test]
    fn test_validate_vacuous_pass() {
        let input = raw(&[("z", json!(true))]);
        let result = contract().validate(["z"], &input).unwrap();
        assert_eq!(result, input);

        let result = Contract::new().validate(["a"], &raw(&[("a", json!("q"))])).unwrap();
        assert_eq!(result["a"], json!("q"));
    }

    #[test]
    fn test_shrink_leaves_receiver() {
        let full = contract();
        let shrunk = full.shrink(["b", "missing"]);

        assert_eq!(shrunk.keys().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(full.len(), 3);
    }

    #[test]
    fn test_merge_adds_missing_fields() {
        let mut merged = Contract::new().field("a", converters::integer());
        merged
            .merge(&contract().field("extra", converters::boolean()))
            .unwrap();

        assert_eq!(
            merged.keys().collect::<Vec<_>>(),
            vec!["a", "b", "name", "extra"]
        );
    }

    #[test]
    fn test_merge_rejects_conflicting_converters() {
        let mut merged = contract();
        let err = merged
            .merge(&Contract::new().field("a", converters::string()))
            .unwrap_err();

        assert!(err.message.contains("'a'"));
        assert!(err.message.contains("'integer' and 'string'"));
    }

    #[test]
    fn test_convert_uncovered() {
        assert!(contract().convert("zzz", &json!(1)).is_none());
        assert_eq!(contract().convert("a", &json!("7")).unwrap().unwrap(), json!(7));
    }

    #[test]
    fn test_contract_display() {
        assert_eq!(Contract::new().to_string(), "Contract()");
        assert_eq!(
            contract().to_string(),
            "Contract:\n  a: integer\n  b: integer\n  name: string"
        );
    }
}
