//! Array controller
//!
//! Holds the elements of an array row as base inputs. Positions change on
//! reorder and remove; element identities never do. Every mutation returns
//! the complete list of values so the caller can forward it as one update.

use serde_json::Value;
use thiserror::Error;

use crate::input::{BaseInput, ElementId, InputError};
use crate::schema::ValueType;
use crate::value::{FieldValue, ScalarValue};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArrayError {
    #[error("index {index} is out of range for an array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no array element with id {0}")]
    UnknownElement(ElementId),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// One element of an array row
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayElement {
    pub input: BaseInput,
    /// Set for elements added by the user; only drives the entrance animation
    pub animate_entrance: bool,
}

impl ArrayElement {
    pub fn id(&self) -> ElementId {
        self.input.id()
    }
}

/// Ordered, homogeneous list of editable elements
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayController {
    element_type: ValueType,
    enum_values: Vec<String>,
    elements: Vec<ArrayElement>,
}

impl ArrayController {
    /// Controller over `values`. Elements whose JSON does not fit
    /// `element_type` start from the type default.
    pub fn new(element_type: ValueType, enum_values: Vec<String>, values: &[Value]) -> Self {
        let elements = values
            .iter()
            .map(|v| {
                let mut input = BaseInput::from_model(element_type, &enum_values, Some(v));
                if input.current().is_none() {
                    input = BaseInput::with_default(element_type, &enum_values);
                }
                ArrayElement {
                    input,
                    animate_entrance: false,
                }
            })
            .collect();

        Self {
            element_type,
            enum_values,
            elements,
        }
    }

    pub fn element_type(&self) -> ValueType {
        self.element_type
    }

    pub fn enum_values(&self) -> &[String] {
        &self.enum_values
    }

    pub fn elements(&self) -> &[ArrayElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(ArrayElement::id).collect()
    }

    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn values(&self) -> Vec<ScalarValue> {
        self.elements
            .iter()
            .map(|e| {
                e.input
                    .current()
                    .unwrap_or_else(|| ScalarValue::default_for(self.element_type, &self.enum_values))
            })
            .collect()
    }

    pub fn field_value(&self) -> FieldValue {
        FieldValue::Array(self.values())
    }

    /// Append a default-valued element with a fresh identifier
    pub fn add(&mut self) -> FieldValue {
        self.elements.push(ArrayElement {
            input: BaseInput::with_default(self.element_type, &self.enum_values),
            animate_entrance: true,
        });
        self.field_value()
    }

    pub fn remove(&mut self, index: usize) -> Result<FieldValue, ArrayError> {
        self.check_index(index)?;
        self.elements.remove(index);
        Ok(self.field_value())
    }

    /// Move the element at `from` to `to`. Without a destination nothing
    /// happens and `None` is returned.
    pub fn reorder(&mut self, from: usize, to: Option<usize>) -> Result<Option<FieldValue>, ArrayError> {
        let Some(to) = to else {
            return Ok(None);
        };
        self.check_index(from)?;
        self.check_index(to)?;

        let element = self.elements.remove(from);
        self.elements.insert(to, element);
        Ok(Some(self.field_value()))
    }

    /// Apply an edit to the element with identifier `id`, wherever it is now
    pub fn edit(&mut self, id: ElementId, value: ScalarValue) -> Result<FieldValue, ArrayError> {
        let element = self
            .elements
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(ArrayError::UnknownElement(id))?;
        element.input.accept(value)?;
        Ok(self.field_value())
    }

    /// Replace all elements. Every value must match the element type.
    pub fn replace(&mut self, values: Vec<ScalarValue>) -> Result<FieldValue, InputError> {
        let mut elements = Vec::with_capacity(values.len());
        for value in values {
            let mut input = BaseInput::with_default(self.element_type, &self.enum_values);
            input.accept(value)?;
            elements.push(ArrayElement {
                input,
                animate_entrance: false,
            });
        }
        self.elements = elements;
        Ok(self.field_value())
    }

    fn check_index(&self, index: usize) -> Result<(), ArrayError> {
        if index < self.elements.len() {
            Ok(())
        } else {
            Err(ArrayError::IndexOutOfRange {
                index,
                len: self.elements.len(),
            })
        }
    }
}
