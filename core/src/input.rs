//! Typed inputs
//!
//! Every editable cell of the input table is a [`TypedInput`]: either one of
//! the five base inputs or an array of base inputs. Base inputs carry a
//! locally generated [`ElementId`] which edits are addressed by.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::array::ArrayController;
use crate::schema::{RowDescriptor, ValueType};
use crate::value::{parse_number, FieldValue, PathValue, ScalarValue};

/// Stable, client-side identity of an input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Notification raised by a base input whose value changed
#[derive(Clone, Debug, PartialEq)]
pub struct ValueChanged {
    pub id: ElementId,
    pub value: ScalarValue,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("'{0}' is not a valid boolean (expected true or false)")]
    InvalidBoolean(String),

    #[error("'{value}' is not one of the allowed values: {allowed}")]
    NotInEnum { value: String, allowed: String },

    #[error("expected a {expected} value but got a {actual} value")]
    TypeMismatch { expected: ValueType, actual: ValueType },

    #[error("a single value is expected, got {0}")]
    Arity(usize),
}

// ============================================================================
// Base inputs
// ============================================================================

/// Free-form numeric text, coerced on commit
#[derive(Clone, Debug, PartialEq)]
pub struct NumberInput {
    pub id: ElementId,
    text: String,
    committed: Option<Number>,
}

impl NumberInput {
    pub fn new(value: Option<Number>) -> Self {
        Self {
            id: ElementId::new(),
            text: value.as_ref().map(Number::to_string).unwrap_or_default(),
            committed: value,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn committed(&self) -> Option<&Number> {
        self.committed.as_ref()
    }

    /// Update the edit buffer without committing it
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Coerce the edit buffer. Invalid text leaves the committed value alone.
    pub fn commit(&mut self) -> Result<ValueChanged, InputError> {
        let number = parse_number(&self.text)?;
        self.committed = Some(number.clone());
        Ok(ValueChanged {
            id: self.id,
            value: ScalarValue::Number(number),
        })
    }
}

/// Two-state selection
#[derive(Clone, Debug, PartialEq)]
pub struct BooleanInput {
    pub id: ElementId,
    pub value: bool,
}

impl BooleanInput {
    pub fn new(value: bool) -> Self {
        Self {
            id: ElementId::new(),
            value,
        }
    }

    /// Returns `None` when the selection did not change
    pub fn select(&mut self, value: bool) -> Option<ValueChanged> {
        if self.value == value {
            return None;
        }
        self.value = value;
        Some(ValueChanged {
            id: self.id,
            value: ScalarValue::Boolean(value),
        })
    }
}

/// Selection constrained to a value set
#[derive(Clone, Debug, PartialEq)]
pub struct EnumInput {
    pub id: ElementId,
    pub value: String,
    pub enum_values: Vec<String>,
}

impl EnumInput {
    pub fn new(value: Option<String>, enum_values: Vec<String>) -> Self {
        let value = value
            .or_else(|| enum_values.first().cloned())
            .unwrap_or_default();
        Self {
            id: ElementId::new(),
            value,
            enum_values,
        }
    }

    pub fn select(&mut self, value: &str) -> Result<Option<ValueChanged>, InputError> {
        if !self.enum_values.iter().any(|v| v == value) {
            return Err(InputError::NotInEnum {
                value: value.to_string(),
                allowed: self.enum_values.join(", "),
            });
        }
        if self.value == value {
            return Ok(None);
        }
        self.value = value.to_string();
        Ok(Some(ValueChanged {
            id: self.id,
            value: ScalarValue::Enum(self.value.clone()),
        }))
    }
}

/// Read-only file reference plus a file-selection trigger
#[derive(Clone, Debug, PartialEq)]
pub struct PathInput {
    pub id: ElementId,
    pub value: Option<PathValue>,
}

impl PathInput {
    pub fn new(value: Option<PathValue>) -> Self {
        Self {
            id: ElementId::new(),
            value,
        }
    }

    pub fn display(&self) -> &str {
        self.value.as_ref().map(|p| p.filepath.as_str()).unwrap_or("")
    }

    /// Result of the file-selection dialog
    pub fn select(&mut self, filepath: impl Into<String>) -> ValueChanged {
        self.value = Some(PathValue::new(filepath));
        ValueChanged {
            id: self.id,
            value: ScalarValue::Path(self.value.clone()),
        }
    }
}

/// Free-form text
#[derive(Clone, Debug, PartialEq)]
pub struct StringInput {
    pub id: ElementId,
    pub text: String,
}

impl StringInput {
    pub fn new(text: String) -> Self {
        Self {
            id: ElementId::new(),
            text,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> ValueChanged {
        self.text = text.into();
        ValueChanged {
            id: self.id,
            value: ScalarValue::String(self.text.clone()),
        }
    }
}

/// One of the five base inputs
#[derive(Clone, Debug, PartialEq)]
pub enum BaseInput {
    Number(NumberInput),
    Boolean(BooleanInput),
    Enum(EnumInput),
    Path(PathInput),
    String(StringInput),
}

impl BaseInput {
    /// Base input of `value_type` initialised from a model value.
    ///
    /// `None` or a value of the wrong shape gives an empty number, `false`,
    /// the first enum value, a null path or the empty string.
    pub fn from_model(value_type: ValueType, enum_values: &[String], value: Option<&Value>) -> Self {
        let scalar = value.and_then(|v| ScalarValue::from_json(value_type, v));
        match (value_type, scalar) {
            (ValueType::Number, Some(ScalarValue::Number(n))) => BaseInput::Number(NumberInput::new(Some(n))),
            (ValueType::Number, _) => BaseInput::Number(NumberInput::new(None)),
            (ValueType::Boolean, Some(ScalarValue::Boolean(b))) => BaseInput::Boolean(BooleanInput::new(b)),
            (ValueType::Boolean, _) => BaseInput::Boolean(BooleanInput::new(false)),
            (ValueType::Enum, Some(ScalarValue::Enum(s))) => {
                BaseInput::Enum(EnumInput::new(Some(s), enum_values.to_vec()))
            }
            (ValueType::Enum, _) => BaseInput::Enum(EnumInput::new(None, enum_values.to_vec())),
            (ValueType::Path, Some(ScalarValue::Path(p))) => BaseInput::Path(PathInput::new(p)),
            (ValueType::Path, _) => BaseInput::Path(PathInput::new(None)),
            (ValueType::String, Some(ScalarValue::String(s))) => BaseInput::String(StringInput::new(s)),
            (ValueType::String, _) => BaseInput::String(StringInput::new(String::new())),
        }
    }

    /// Freshly constructed input holding the type default
    pub fn with_default(value_type: ValueType, enum_values: &[String]) -> Self {
        let mut input = Self::from_model(value_type, enum_values, None);
        if let BaseInput::Number(n) = &mut input {
            *n = NumberInput::new(Some(Number::from(1)));
        }
        input
    }

    pub fn id(&self) -> ElementId {
        match self {
            BaseInput::Number(i) => i.id,
            BaseInput::Boolean(i) => i.id,
            BaseInput::Enum(i) => i.id,
            BaseInput::Path(i) => i.id,
            BaseInput::String(i) => i.id,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            BaseInput::Number(_) => ValueType::Number,
            BaseInput::Boolean(_) => ValueType::Boolean,
            BaseInput::Enum(_) => ValueType::Enum,
            BaseInput::Path(_) => ValueType::Path,
            BaseInput::String(_) => ValueType::String,
        }
    }

    /// Current value, `None` only for a number that was never committed
    pub fn current(&self) -> Option<ScalarValue> {
        match self {
            BaseInput::Number(i) => i.committed().cloned().map(ScalarValue::Number),
            BaseInput::Boolean(i) => Some(ScalarValue::Boolean(i.value)),
            BaseInput::Enum(i) => Some(ScalarValue::Enum(i.value.clone())),
            BaseInput::Path(i) => Some(ScalarValue::Path(i.value.clone())),
            BaseInput::String(i) => Some(ScalarValue::String(i.text.clone())),
        }
    }

    pub fn display(&self) -> String {
        match self {
            BaseInput::Number(i) => i.text().to_string(),
            BaseInput::Path(i) => i.display().to_string(),
            other => other.current().map(|v| v.display()).unwrap_or_default(),
        }
    }

    /// Apply a typed value, going through the same checks as the control
    pub fn accept(&mut self, value: ScalarValue) -> Result<ValueChanged, InputError> {
        let id = self.id();
        let unchanged = ValueChanged {
            id,
            value: value.clone(),
        };
        match (self, value) {
            (BaseInput::Number(i), ScalarValue::Number(n)) => {
                i.set_text(n.to_string());
                i.commit()
            }
            (BaseInput::Boolean(i), ScalarValue::Boolean(b)) => Ok(i.select(b).unwrap_or(unchanged)),
            (BaseInput::Enum(i), ScalarValue::Enum(s)) => Ok(i.select(&s)?.unwrap_or(unchanged)),
            (BaseInput::Path(i), ScalarValue::Path(p)) => {
                i.value = p;
                Ok(unchanged)
            }
            (BaseInput::String(i), ScalarValue::String(s)) => Ok(i.set_text(s)),
            (input, value) => Err(InputError::TypeMismatch {
                expected: input.value_type(),
                actual: value.value_type(),
            }),
        }
    }
}

// ============================================================================
// Typed input
// ============================================================================

/// Control rendered in the value column of a row
#[derive(Clone, Debug, PartialEq)]
pub enum TypedInput {
    Base(BaseInput),
    Array(ArrayController),
}

impl TypedInput {
    /// Build the control for `row` from its model value (if any)
    pub fn for_row(row: &RowDescriptor, value: Option<&Value>) -> Self {
        if row.is_array {
            let elements = value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);
            TypedInput::Array(ArrayController::new(row.value_type, row.enum_values.clone(), elements))
        } else {
            TypedInput::Base(BaseInput::from_model(row.value_type, &row.enum_values, value))
        }
    }

    /// Value type of the control (of its elements for arrays)
    pub fn value_type(&self) -> ValueType {
        match self {
            TypedInput::Base(b) => b.value_type(),
            TypedInput::Array(a) => a.element_type(),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypedInput::Array(_))
    }

    pub fn current(&self) -> Option<FieldValue> {
        match self {
            TypedInput::Base(b) => b.current().map(FieldValue::Scalar),
            TypedInput::Array(a) => Some(a.field_value()),
        }
    }

    pub fn display(&self) -> String {
        match self {
            TypedInput::Base(b) => b.display(),
            TypedInput::Array(a) => a.field_value().display(),
        }
    }

    /// Coerce entered text into the control and return the value to submit.
    ///
    /// Base inputs take exactly one text; arrays are replaced by one element
    /// per text.
    pub fn apply_texts(&mut self, texts: &[String]) -> Result<FieldValue, InputError> {
        match self {
            TypedInput::Base(base) => {
                let [text] = texts else {
                    return Err(InputError::Arity(texts.len()));
                };
                let enum_values = match base {
                    BaseInput::Enum(e) => e.enum_values.clone(),
                    _ => Vec::new(),
                };
                let value = ScalarValue::parse_text(base.value_type(), &enum_values, text)?;
                Ok(FieldValue::Scalar(base.accept(value)?.value))
            }
            TypedInput::Array(array) => {
                let values = texts
                    .iter()
                    .map(|t| ScalarValue::parse_text(array.element_type(), array.enum_values(), t))
                    .collect::<Result<Vec<_>, _>>()?;
                array.replace(values)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value_type: ValueType, is_array: bool) -> RowDescriptor {
        RowDescriptor {
            table: "General".to_string(),
            row_key: "key".to_string(),
            value_type,
            is_array,
            enum_values: vec!["first".to_string(), "second".to_string()],
            description: None,
        }
    }

    #[test]
    fn test_number_commit_rejects_invalid_text() {
        let mut input = NumberInput::new(Some(Number::from(5)));
        input.set_text("5x");
        assert_eq!(input.commit(), Err(InputError::InvalidNumber("5x".to_string())));
        assert_eq!(input.committed(), Some(&Number::from(5)));

        input.set_text("6.5");
        let changed = input.commit().unwrap();
        assert_eq!(changed.id, input.id);
        assert_eq!(changed.value, ScalarValue::Number(Number::from_f64(6.5).unwrap()));
    }

    #[test]
    fn test_boolean_select_same_value_is_silent() {
        let mut input = BooleanInput::new(false);
        assert!(input.select(false).is_none());
        assert_eq!(input.select(true).unwrap().value, ScalarValue::Boolean(true));
    }

    #[test]
    fn test_enum_defaults_to_first_value() {
        let input = EnumInput::new(None, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(input.value, "x");
    }

    #[test]
    fn test_enum_rejects_values_outside_set() {
        let mut input = EnumInput::new(None, vec!["x".to_string()]);
        assert!(matches!(input.select("z"), Err(InputError::NotInEnum { .. })));
        assert_eq!(input.value, "x");
    }

    #[test]
    fn test_path_select_raises_change() {
        let mut input = PathInput::new(None);
        assert_eq!(input.display(), "");
        let changed = input.select("grid_net.nc");
        assert_eq!(changed.value, ScalarValue::Path(Some(PathValue::new("grid_net.nc"))));
        assert_eq!(input.display(), "grid_net.nc");
    }

    #[test]
    fn test_for_row_dispatches_on_value_type() {
        let boolean = TypedInput::for_row(&row(ValueType::Boolean, false), Some(&json!(true)));
        assert!(matches!(boolean, TypedInput::Base(BaseInput::Boolean(BooleanInput { value: true, .. }))));

        let missing_number = TypedInput::for_row(&row(ValueType::Number, false), None);
        assert_eq!(missing_number.current(), None);
        assert_eq!(missing_number.display(), "");

        let array = TypedInput::for_row(&row(ValueType::Number, true), Some(&json!([1, 2, 3])));
        assert!(array.is_array());
        assert_eq!(array.value_type(), ValueType::Number);
        assert_eq!(
            array.current().unwrap().to_json(),
            json!([1, 2, 3])
        );
    }

    #[test]
    fn test_apply_texts_coerces_through_input() {
        let mut input = TypedInput::for_row(&row(ValueType::Number, false), Some(&json!(1)));
        assert_eq!(
            input.apply_texts(&["oops".to_string()]),
            Err(InputError::InvalidNumber("oops".to_string()))
        );
        assert_eq!(input.apply_texts(&["2".to_string()]).unwrap().to_json(), json!(2));
        assert_eq!(
            input.apply_texts(&["1".to_string(), "2".to_string()]),
            Err(InputError::Arity(2))
        );

        let mut array = TypedInput::for_row(&row(ValueType::Enum, true), None);
        let value = array
            .apply_texts(&["second".to_string(), "first".to_string()])
            .unwrap();
        assert_eq!(value.to_json(), json!(["second", "first"]));
    }

    #[test]
    fn test_accept_checks_type() {
        let mut input = BaseInput::from_model(ValueType::String, &[], Some(&json!("abc")));
        let err = input.accept(ScalarValue::Boolean(true)).unwrap_err();
        assert_eq!(
            err,
            InputError::TypeMismatch {
                expected: ValueType::String,
                actual: ValueType::Boolean
            }
        );
    }
}
