//! Render-ready section forms
//!
//! Joins a section schema with its model: one row per schema property with
//! its typed input and comment.

use indexmap::IndexMap;
use tracing::warn;

use crate::input::TypedInput;
use crate::model::{Model, ProjectModel};
use crate::schema::{rows, RowDescriptor, Schema};

/// One line of the Key / Value / Comment table
#[derive(Clone, Debug, PartialEq)]
pub struct FormRow {
    pub descriptor: RowDescriptor,
    pub input: TypedInput,
    pub comment: String,
}

impl FormRow {
    pub fn key(&self) -> &str {
        &self.descriptor.row_key
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionForm {
    /// Section name used in update URLs
    pub section: String,
    pub title: String,
    pub rows: Vec<FormRow>,
}

impl SectionForm {
    /// Build the form of `section`. Schema fields missing from the model are
    /// logged and rendered with an empty value; model keys the schema does
    /// not declare are ignored.
    pub fn build(section: &str, schema: &Schema, model: &Model) -> Self {
        let rows = rows(schema)
            .into_iter()
            .map(|descriptor| {
                let value = model.value(&descriptor.row_key);
                if value.is_none() {
                    warn!(
                        section = %section,
                        key = %descriptor.row_key,
                        "The key is not available in the provided model"
                    );
                }
                FormRow {
                    input: TypedInput::for_row(&descriptor, value),
                    comment: model.comment(&descriptor.row_key).to_string(),
                    descriptor,
                }
            })
            .collect();

        Self {
            section: section.to_string(),
            title: schema.title.clone(),
            rows,
        }
    }

    pub fn row(&self, key: &str) -> Option<&FormRow> {
        self.rows.iter().find(|r| r.key() == key)
    }

    pub fn row_mut(&mut self, key: &str) -> Option<&mut FormRow> {
        self.rows.iter_mut().find(|r| r.key() == key)
    }
}

/// Forms for every section in `sections` that has both a schema and a model,
/// in the order of `sections`.
pub fn build_forms<S: AsRef<str>>(
    sections: &[S],
    schemas: &IndexMap<String, Schema>,
    project: &ProjectModel,
) -> Vec<SectionForm> {
    sections
        .iter()
        .filter_map(|name| {
            let name: &str = name.as_ref();
            let schema = schemas.get(name)?;
            let model = project.section(name)?;
            Some(SectionForm::build(name, schema, model))
        })
        .collect()
}
