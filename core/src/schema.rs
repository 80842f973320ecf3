//! Section schemas and the row mapper
//!
//! A section schema is a reduced JSON Schema: a title plus an ordered map of
//! property descriptions. [`rows`] turns it into one [`RowDescriptor`] per
//! property, which is what the input table renders.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Value Type
// ============================================================================

/// Editable value type of a row (or of the elements of an array row)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Number,
    Enum,
    Boolean,
    Path,
    String,
}

impl ValueType {
    /// Map a JSON Schema `type` name. Unknown names fall back to `String`.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "number" | "integer" => ValueType::Number,
            "enum" => ValueType::Enum,
            "boolean" => ValueType::Boolean,
            "path" => ValueType::Path,
            _ => ValueType::String,
        }
    }

    /// Wire name, as sent in the `valuetype` field of a value update
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::Enum => "enum",
            ValueType::Boolean => "boolean",
            ValueType::Path => "path",
            ValueType::String => "string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Schema of one configuration section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub title: String,
    /// Property descriptions in the order the backend enumerates them
    #[serde(default)]
    pub properties: IndexMap<String, ValueDescription>,
}

/// Description of a single property.
///
/// Enum, typed and array descriptions share one shape: the row mapper decides
/// which one applies from the keys that are present. Other JSON Schema
/// keywords are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueDescription {
    #[serde(
        rename = "enum",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_enum_values"
    )]
    pub enum_values: Option<Vec<String>>,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_type_name"
    )]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ValueDescription>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ValueDescription {
    /// Typed description, e.g. `{"type": "number"}`
    pub fn typed(type_name: &str) -> Self {
        Self {
            type_name: Some(type_name.to_string()),
            ..Default::default()
        }
    }

    /// Enum description, e.g. `{"enum": ["a", "b"]}`
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enum_values: Some(values.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Array description wrapping `items`
    pub fn array_of(items: ValueDescription) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    pub fn is_array(&self) -> bool {
        self.items.is_some()
    }

    /// Value type of this row, looking through an `items` wrapper
    pub fn value_type(&self) -> ValueType {
        match &self.items {
            Some(items) => items.base_value_type(),
            None => self.base_value_type(),
        }
    }

    /// Allowed values of this row (of its elements for an array row)
    pub fn allowed_values(&self) -> &[String] {
        let base = self.items.as_deref().unwrap_or(self);
        base.enum_values.as_deref().unwrap_or(&[])
    }

    fn base_value_type(&self) -> ValueType {
        // `enum` wins over any declared type
        if self.enum_values.is_some() {
            return ValueType::Enum;
        }

        let is_path = self.type_name.as_deref() == Some("string")
            && self.format.as_deref() == Some("path");
        if is_path {
            return ValueType::Path;
        }

        self.type_name
            .as_deref()
            .map(ValueType::from_type_name)
            .unwrap_or(ValueType::String)
    }
}

fn deserialize_enum_values<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(values.map(|values| {
        values
            .into_iter()
            .map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()
    }))
}

/// Accepts `"number"` as well as `["number", "null"]`.
fn deserialize_type_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Array(types)) => types
            .into_iter()
            .filter_map(|t| t.as_str().map(str::to_string))
            .find(|t| t != "null"),
        _ => None,
    })
}

// ============================================================================
// Row Mapper
// ============================================================================

/// Render-ready description of one schema property
#[derive(Clone, Debug, PartialEq)]
pub struct RowDescriptor {
    /// Title of the schema the row belongs to
    pub table: String,
    pub row_key: String,
    pub value_type: ValueType,
    pub is_array: bool,
    pub enum_values: Vec<String>,
    pub description: Option<String>,
}

impl RowDescriptor {
    pub fn from_description(table: &str, key: &str, description: &ValueDescription) -> Self {
        Self {
            table: table.to_string(),
            row_key: key.to_string(),
            value_type: description.value_type(),
            is_array: description.is_array(),
            enum_values: description.allowed_values().to_vec(),
            description: description.description.clone(),
        }
    }
}

/// Map every schema property to a row, in schema order.
pub fn rows(schema: &Schema) -> Vec<RowDescriptor> {
    schema
        .properties
        .iter()
        .map(|(key, description)| RowDescriptor::from_description(&schema.title, key, description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema_from(value: Value) -> Schema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_enum_key_wins_over_type() {
        let schema = schema_from(json!({
            "title": "Physics",
            "properties": {
                "mode": { "type": "number", "enum": ["a", "b"] },
                "kind": { "type": "string", "format": "path", "enum": ["x"] },
            }
        }));

        let rows = rows(&schema);
        assert!(rows.iter().all(|r| r.value_type == ValueType::Enum));
        assert_eq!(rows[0].enum_values, vec!["a", "b"]);
    }

    #[test]
    fn test_string_with_path_format_is_path() {
        let schema = schema_from(json!({
            "title": "Geometry",
            "properties": {
                "netFile": { "type": "string", "format": "path" },
                "other": { "type": "number", "format": "path" },
                "plain": { "type": "string", "format": "date-time" },
            }
        }));

        let rows = rows(&schema);
        assert_eq!(rows[0].value_type, ValueType::Path);
        assert_eq!(rows[1].value_type, ValueType::Number);
        assert_eq!(rows[2].value_type, ValueType::String);
    }

    #[test]
    fn test_items_wrapper_marks_array() {
        let schema = schema_from(json!({
            "title": "Output",
            "properties": {
                "times": { "items": { "type": "integer" } },
                "files": { "items": { "type": "string", "format": "path" } },
                "modes": { "items": { "enum": ["on", "off"] } },
                "flag": { "type": "boolean" },
            }
        }));

        let rows = rows(&schema);
        assert!(rows[0].is_array);
        assert_eq!(rows[0].value_type, ValueType::Number);
        assert!(rows[1].is_array);
        assert_eq!(rows[1].value_type, ValueType::Path);
        assert!(rows[2].is_array);
        assert_eq!(rows[2].value_type, ValueType::Enum);
        assert_eq!(rows[2].enum_values, vec!["on", "off"]);
        assert!(!rows[3].is_array);
    }

    #[test]
    fn test_unknown_or_missing_type_defaults_to_string() {
        let schema = schema_from(json!({
            "title": "General",
            "properties": {
                "a": { "type": "object" },
                "b": { "title": "No type at all" },
                "c": { "type": ["number", "null"] },
            }
        }));

        let rows = rows(&schema);
        assert_eq!(rows[0].value_type, ValueType::String);
        assert_eq!(rows[1].value_type, ValueType::String);
        assert_eq!(rows[2].value_type, ValueType::Number);
    }

    #[test]
    fn test_rows_follow_schema_order() {
        let schema = schema_from(json!({
            "title": "Time",
            "properties": {
                "zeta": { "type": "number" },
                "alpha": { "type": "number" },
                "mid": { "type": "number" },
            }
        }));

        let keys: Vec<_> = rows(&schema).into_iter().map(|r| r.row_key).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert!(rows(&schema).iter().all(|r| r.table == "Time"));
    }

    #[test]
    fn test_rows_follow_order_of_schema_text() {
        let text = r#"{"title": "Time", "properties": {"tStop": {}, "dtUser": {}, "tStart": {}}}"#;
        let schema: Schema = serde_json::from_str(text).unwrap();
        let document: Value = serde_json::from_str(text).unwrap();

        let direct: Vec<_> = rows(&schema).into_iter().map(|r| r.row_key).collect();
        let via_value: Vec<_> = rows(&schema_from(document)).into_iter().map(|r| r.row_key).collect();

        assert_eq!(direct, vec!["tStop", "dtUser", "tStart"]);
        assert_eq!(via_value, direct);
    }

    #[test]
    fn test_non_string_enum_values_are_stringified() {
        let description: ValueDescription =
            serde_json::from_value(json!({ "enum": [1, 2, "three"] })).unwrap();
        assert_eq!(description.allowed_values(), ["1", "2", "three"]);
    }

    #[test]
    fn test_value_type_wire_names() {
        assert_eq!(serde_json::to_value(ValueType::Boolean).unwrap(), json!("boolean"));
        assert_eq!(ValueType::from_type_name("integer"), ValueType::Number);
        assert_eq!(ValueType::from_type_name("whatever"), ValueType::String);
    }
}
