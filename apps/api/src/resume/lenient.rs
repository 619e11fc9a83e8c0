//! Forgiving field deserializers for records produced by the structuring model.
//!
//! The model's JSON is untrusted: a field of the wrong shape degrades to its
//! default instead of rejecting the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes `T`, falling back to `T::default()` on any shape mismatch.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Optional scalar: strings are kept as-is, numbers and booleans are stringified,
/// anything else (null, arrays, objects) is treated as absent.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

/// List of strings. Accepts an array (non-scalar items dropped) or a single
/// comma-separated string.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string_list(&value))
}

pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn value_to_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => vec![],
    }
}

/// Sequence of records. The list length is preserved: a bare string item becomes a
/// record whose `description` is that string, any other malformed item becomes
/// `T::default()`.
pub fn record_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().map(record_from_item).collect(),
        _ => vec![],
    })
}

fn record_from_item<T: DeserializeOwned + Default>(item: Value) -> T {
    let item = match item {
        Value::String(text) => serde_json::json!({ "description": text }),
        other => other,
    };
    serde_json::from_value(item).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_to_string_numbers() {
        assert_eq!(scalar_to_string(&json!(2021)), Some("2021".to_string()));
        assert_eq!(scalar_to_string(&json!(null)), None);
        assert_eq!(scalar_to_string(&json!(["a"])), None);
    }

    #[test]
    fn test_string_list_from_comma_string() {
        let list = value_to_string_list(&json!("Rust, SQL , ,Docker"));
        assert_eq!(list, vec!["Rust", "SQL", "Docker"]);
    }

    #[test]
    fn test_string_list_drops_nested_values() {
        let list = value_to_string_list(&json!(["Rust", {"x": 1}, 3]));
        assert_eq!(list, vec!["Rust", "3"]);
    }

    #[derive(Debug, Default, PartialEq, serde::Deserialize)]
    struct Entry {
        #[serde(default)]
        description: Option<String>,
    }

    #[test]
    fn test_record_from_item_keeps_strings_as_description() {
        let entry: Entry = record_from_item(json!("Engineer, Acme"));
        assert_eq!(entry.description.as_deref(), Some("Engineer, Acme"));
        let entry: Entry = record_from_item(json!(null));
        assert_eq!(entry, Entry::default());
        let entry: Entry = record_from_item(json!([1, 2]));
        assert_eq!(entry, Entry::default());
    }

    #[test]
    fn test_string_list_from_object_is_empty() {
        assert!(value_to_string_list(&json!({"skills": "rust"})).is_empty());
    }
}
