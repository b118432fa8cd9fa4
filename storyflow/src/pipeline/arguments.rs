//! Call arguments.

use crate::errors::ArityError;
use indexmap::IndexMap;
use serde_json::Value;

/// Arguments of one story call.
///
/// A call is either fully positional or fully keyword.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    keyword: IndexMap<String, Value>,
}

impl Arguments {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates positional arguments.
    #[must_use]
    pub fn positional<I: IntoIterator<Item = Value>>(values: I) -> Self {
        Self {
            positional: values.into_iter().collect(),
            keyword: IndexMap::new(),
        }
    }

    /// Creates keyword arguments.
    #[must_use]
    pub fn keyword<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            positional: Vec::new(),
            keyword: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a keyword argument.
    #[must_use]
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(key.into(), value.into());
        self
    }

    /// Matches the arguments to the declared names, in declared order.
    pub(crate) fn bind(
        self,
        story: &str,
        declared: &[String],
    ) -> Result<IndexMap<String, Value>, ArityError> {
        if !self.positional.is_empty() && !self.keyword.is_empty() {
            return Err(ArityError::Mixed {
                story: story.to_string(),
            });
        }

        if self.keyword.is_empty() {
            if self.positional.len() != declared.len() {
                return Err(ArityError::Count {
                    story: story.to_string(),
                    expected: declared.len(),
                    given: self.positional.len(),
                });
            }
            return Ok(declared.iter().cloned().zip(self.positional).collect());
        }

        if let Some(key) = self.keyword.keys().find(|k| !declared.contains(*k)) {
            return Err(ArityError::UnknownKeyword {
                story: story.to_string(),
                key: key.clone(),
            });
        }
        let mut keyword = self.keyword;
        declared
            .iter()
            .map(|name| {
                keyword
                    .shift_remove(name)
                    .map(|value| (name.clone(), value))
                    .ok_or_else(|| ArityError::MissingKeyword {
                        story: story.to_string(),
                        key: name.clone(),
                    })
            })
            .collect()
    }
}

impl From<()> for Arguments {
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        Self::positional(values)
    }
}

impl<const N: usize> From<[Value; N]> for Arguments {
    fn from(values: [Value; N]) -> Self {
        Self::positional(values)
    }
}

impl From<IndexMap<String, Value>> for Arguments {
    fn from(keyword: IndexMap<String, Value>) -> Self {
        Self {
            positional: Vec::new(),
            keyword,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn declared() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn test_positional() {
        let bound = Arguments::from([json!(1), json!(3)])
            .bind("Simple.x", &declared())
            .unwrap();
        assert_eq!(bound["a"], json!(1));
        assert_eq!(bound["b"], json!(3));
    }

    #[test]
    fn test_keyword_uses_declared_order() {
        let bound = Arguments::keyword([("b", json!(3)), ("a", json!(1))])
            .bind("Simple.x", &declared())
            .unwrap();
        assert_eq!(bound.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_wrong_count() {
        let err = Arguments::new().arg(1).bind("Simple.x", &declared()).unwrap_err();
        assert_eq!(
            err,
            ArityError::Count {
                story: "Simple.x".to_string(),
                expected: 2,
                given: 1,
            }
        );
        assert!(Arguments::from(()).bind("Empty.x", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_and_missing_keyword() {
        let err = Arguments::new()
            .kwarg("a", 1)
            .kwarg("c", 2)
            .bind("Simple.x", &declared())
            .unwrap_err();
        assert!(matches!(err, ArityError::UnknownKeyword { ref key, .. } if key == "c"));

        let err = Arguments::new()
            .kwarg("a", 1)
            .bind("Simple.x", &declared())
            .unwrap_err();
        assert!(matches!(err, ArityError::MissingKeyword { ref key, .. } if key == "b"));
    }

    #[test]
    fn test_mixed() {
        let err = Arguments::new()
            .arg(1)
            .kwarg("b", 2)
            .bind("Simple.x", &declared())
            .unwrap_err();
        assert!(matches!(err, ArityError::Mixed { .. }));
    }
}
