//! Typed field values
//!
//! Model documents carry plain JSON. Once a row's [`ValueType`] is known the
//! JSON is read into a [`ScalarValue`] (or a list of them for array rows),
//! and written back to JSON when an edit is submitted.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

use crate::input::InputError;
use crate::schema::ValueType;

/// A file reference as stored in the model: `{"filepath": "..."}`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathValue {
    pub filepath: String,
}

impl PathValue {
    pub fn new(filepath: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }
}

/// Value of a single (non-array) field or array element
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    Number(Number),
    Boolean(bool),
    Enum(String),
    /// `None` is the null path
    Path(Option<PathValue>),
    String(String),
}

impl ScalarValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            ScalarValue::Number(_) => ValueType::Number,
            ScalarValue::Boolean(_) => ValueType::Boolean,
            ScalarValue::Enum(_) => ValueType::Enum,
            ScalarValue::Path(_) => ValueType::Path,
            ScalarValue::String(_) => ValueType::String,
        }
    }

    /// Value a freshly added input of `value_type` starts with
    pub fn default_for(value_type: ValueType, enum_values: &[String]) -> Self {
        match value_type {
            ValueType::Number => ScalarValue::Number(Number::from(1)),
            ValueType::Boolean => ScalarValue::Boolean(false),
            ValueType::Enum => ScalarValue::Enum(enum_values.first().cloned().unwrap_or_default()),
            ValueType::Path => ScalarValue::Path(None),
            ValueType::String => ScalarValue::String(String::new()),
        }
    }

    /// Read a model value as `value_type`.
    ///
    /// Returns `None` when the JSON does not have a usable shape (including
    /// `null` for anything but a path). String and enum rows accept any
    /// scalar as its text, matching how enum value sets are read.
    pub fn from_json(value_type: ValueType, value: &Value) -> Option<Self> {
        match (value_type, value) {
            (ValueType::Number, Value::Number(n)) => Some(ScalarValue::Number(n.clone())),
            (ValueType::Boolean, Value::Bool(b)) => Some(ScalarValue::Boolean(*b)),
            (ValueType::Enum, Value::String(s)) => Some(ScalarValue::Enum(s.clone())),
            (ValueType::Enum, Value::Number(n)) => Some(ScalarValue::Enum(n.to_string())),
            (ValueType::Enum, Value::Bool(b)) => Some(ScalarValue::Enum(b.to_string())),
            (ValueType::Path, Value::Null) => Some(ScalarValue::Path(None)),
            (ValueType::Path, Value::Object(_)) => serde_json::from_value::<PathValue>(value.clone())
                .ok()
                .map(|p| ScalarValue::Path(Some(p))),
            (ValueType::String, Value::String(s)) => Some(ScalarValue::String(s.clone())),
            (ValueType::String, Value::Number(n)) => Some(ScalarValue::String(n.to_string())),
            (ValueType::String, Value::Bool(b)) => Some(ScalarValue::String(b.to_string())),
            _ => None,
        }
    }

    /// Coerce user-entered text into a value of `value_type`
    pub fn parse_text(
        value_type: ValueType,
        enum_values: &[String],
        text: &str,
    ) -> Result<Self, InputError> {
        match value_type {
            ValueType::Number => parse_number(text).map(ScalarValue::Number),
            ValueType::Boolean => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(ScalarValue::Boolean(true)),
                "false" => Ok(ScalarValue::Boolean(false)),
                _ => Err(InputError::InvalidBoolean(text.to_string())),
            },
            ValueType::Enum => {
                if enum_values.iter().any(|v| v == text) {
                    Ok(ScalarValue::Enum(text.to_string()))
                } else {
                    Err(InputError::NotInEnum {
                        value: text.to_string(),
                        allowed: enum_values.join(", "),
                    })
                }
            }
            ValueType::Path if text.is_empty() => Ok(ScalarValue::Path(None)),
            ValueType::Path => Ok(ScalarValue::Path(Some(PathValue::new(text)))),
            ValueType::String => Ok(ScalarValue::String(text.to_string())),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ScalarValue::Number(n) => Value::Number(n.clone()),
            ScalarValue::Boolean(b) => Value::Bool(*b),
            ScalarValue::Enum(s) | ScalarValue::String(s) => Value::String(s.clone()),
            ScalarValue::Path(None) => Value::Null,
            ScalarValue::Path(Some(p)) => serde_json::json!({ "filepath": p.filepath }),
        }
    }

    /// Text shown in an input control
    pub fn display(&self) -> String {
        match self {
            ScalarValue::Number(n) => n.to_string(),
            ScalarValue::Boolean(true) => "True".to_string(),
            ScalarValue::Boolean(false) => "False".to_string(),
            ScalarValue::Enum(s) | ScalarValue::String(s) => s.clone(),
            ScalarValue::Path(None) => String::new(),
            ScalarValue::Path(Some(p)) => p.filepath.clone(),
        }
    }
}

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Parse numeric text. Integral text stays integral; anything that is not a
/// finite number is rejected.
pub fn parse_number(text: &str) -> Result<Number, InputError> {
    let trimmed = text.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(Number::from(i));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| InputError::InvalidNumber(text.to_string()))
}

/// Whole value of a row, as submitted to the backend
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Scalar(ScalarValue),
    Array(Vec<ScalarValue>),
}

impl FieldValue {
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Scalar(v) => v.to_json(),
            FieldValue::Array(values) => Value::Array(values.iter().map(ScalarValue::to_json).collect()),
        }
    }

    pub fn display(&self) -> String {
        match self {
            FieldValue::Scalar(v) => v.display(),
            FieldValue::Array(values) => {
                let parts: Vec<String> = values.iter().map(ScalarValue::display).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }
}

impl From<ScalarValue> for FieldValue {
    fn from(value: ScalarValue) -> Self {
        FieldValue::Scalar(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
