//! Built-in converters.

use super::Converter;
use serde_json::Value;

const INVALID: &str = "Invalid value";

/// Accepts integers and strings of decimal digits.
#[must_use]
pub fn integer() -> Converter {
    Converter::new("integer", |value| match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| INVALID.to_string()),
        _ => Err(INVALID.to_string()),
    })
}

/// Accepts strings.
#[must_use]
pub fn string() -> Converter {
    Converter::new("string", |value| match value {
        Value::String(_) => Ok(value.clone()),
        _ => Err(INVALID.to_string()),
    })
}

/// Accepts booleans and the strings `true` and `false`.
#[must_use]
pub fn boolean() -> Converter {
    Converter::new("boolean", |value| match value {
        Value::Bool(_) => Ok(value.clone()),
        Value::String(s) if s == "true" => Ok(Value::Bool(true)),
        Value::String(s) if s == "false" => Ok(Value::Bool(false)),
        _ => Err(INVALID.to_string()),
    })
}

/// Accepts arrays whose items all pass `item`.
#[must_use]
pub fn list_of(item: Converter) -> Converter {
    let name = format!("list_of({})", item.name());
    Converter::new(name, move |value| match value {
        Value::Array(items) => items
            .iter()
            .map(|v| item.convert(v))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        _ => Err(INVALID.to_string()),
    })
}

/// Accepts objects whose keys pass `key` and values pass `value`.
///
/// Converted keys that are not strings are stored in their JSON text form.
#[must_use]
pub fn dict_of(key: Converter, value: Converter) -> Converter {
    let name = format!("dict_of({}, {})", key.name(), value.name());
    Converter::new(name, move |raw| match raw {
        Value::Object(entries) => {
            let mut converted = serde_json::Map::new();
            for (k, v) in entries {
                let new_key = match key.convert(&Value::String(k.clone()))? {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                converted.insert(new_key, value.convert(v)?);
            }
            Ok(Value::Object(converted))
        }
        _ => Err(INVALID.to_string()),
    })
}

/// Accepts `null` or anything `inner` accepts.
#[must_use]
pub fn optional(inner: Converter) -> Converter {
    let name = format!("optional({})", inner.name());
    Converter::new(name, move |value| match value {
        Value::Null => Ok(Value::Null),
        other => inner.convert(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer() {
        let c = integer();
        assert_eq!(c.convert(&json!(3)), Ok(json!(3)));
        assert_eq!(c.convert(&json!("-12")), Ok(json!(-12)));
        assert_eq!(c.convert(&json!("1.5")), Err("Invalid value".to_string()));
        assert!(c.convert(&json!(1.5)).is_err());
        assert!(c.convert(&json!(null)).is_err());
    }

    #[test]
    fn test_string_and_boolean() {
        assert_eq!(string().convert(&json!("x")), Ok(json!("x")));
        assert!(string().convert(&json!(1)).is_err());
        assert_eq!(boolean().convert(&json!("true")), Ok(json!(true)));
        assert_eq!(boolean().convert(&json!(false)), Ok(json!(false)));
        assert!(boolean().convert(&json!("yes")).is_err());
    }

    #[test]
    fn test_list_of() {
        let c = list_of(integer());
        assert_eq!(c.name(), "list_of(integer)");
        assert_eq!(c.convert(&json!(["1", 2])), Ok(json!([1, 2])));
        assert!(c.convert(&json!([1, "x"])).is_err());
        assert!(c.convert(&json!({})).is_err());
    }

    #[test]
    fn test_dict_of() {
        let c = dict_of(string(), integer());
        assert_eq!(c.name(), "dict_of(string, integer)");
        assert_eq!(c.convert(&json!({"a": "1"})), Ok(json!({"a": 1})));
        assert!(c.convert(&json!({"a": "b"})).is_err());
    }

    #[test]
    fn test_optional() {
        let c = optional(integer());
        assert_eq!(c.name(), "optional(integer)");
        assert_eq!(c.convert(&json!(null)), Ok(json!(null)));
        assert_eq!(c.convert(&json!("5")), Ok(json!(5)));
    }
}
