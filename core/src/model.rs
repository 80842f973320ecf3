//! Section models
//!
//! A section model is a flat JSON object of field values plus a `comments`
//! object keyed by lowercase field name.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::debounce::{SlotKey, SlotKind};

/// Current values and comments of one section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default, deserialize_with = "deserialize_comments")]
    pub comments: BTreeMap<String, String>,
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

/// Drops null comments and lowercases keys
fn deserialize_comments<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<String>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_lowercase(), v)))
        .collect())
}

impl Model {
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn set_value(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    /// Comment for `key`, matched case-insensitively; empty when absent
    pub fn comment(&self, key: &str) -> &str {
        self.comments
            .get(&key.to_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_comment(&mut self, key: &str, comment: impl Into<String>) {
        self.comments.insert(key.to_lowercase(), comment.into());
    }
}

/// All sections of one loaded model
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectModel {
    pub id: String,
    pub sections: IndexMap<String, Model>,
}

impl ProjectModel {
    pub fn new(id: impl Into<String>, sections: IndexMap<String, Model>) -> Self {
        Self {
            id: id.into(),
            sections,
        }
    }

    /// Build from the `GET /api/models/{id}` document. Top-level entries that
    /// are not section objects (file paths, nulls) are skipped.
    pub fn from_document(id: impl Into<String>, document: Value) -> Result<Self, serde_json::Error> {
        let entries: IndexMap<String, Value> = serde_json::from_value(document)?;
        let sections = entries
            .into_iter()
            .filter(|(_, v)| v.is_object())
            .filter_map(|(k, v)| serde_json::from_value::<Model>(v).ok().map(|m| (k, m)))
            .collect();
        Ok(Self::new(id, sections))
    }

    pub fn section(&self, name: &str) -> Option<&Model> {
        self.sections.get(name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Model> {
        self.sections.get_mut(name)
    }

    /// Returns `false` if the section is not loaded
    pub fn set_value(&mut self, section: &str, field: &str, value: Value) -> bool {
        match self.sections.get_mut(section) {
            Some(model) => {
                model.set_value(field, value);
                true
            }
            None => false,
        }
    }

    /// Returns `false` if the section is not loaded
    pub fn set_comment(&mut self, section: &str, field: &str, comment: impl Into<String>) -> bool {
        match self.sections.get_mut(section) {
            Some(model) => {
                model.set_comment(field, comment);
                true
            }
            None => false,
        }
    }

    /// Store a submitted or returned value in `key`'s place. Comment
    /// values that are not strings are kept as their JSON text.
    ///
    /// Returns `false` if the section is not loaded.
    pub fn apply(&mut self, key: &SlotKey, value: &Value) -> bool {
        match key.kind {
            SlotKind::Value => self.set_value(&key.section, &key.field, value.clone()),
            SlotKind::Comment => {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                self.set_comment(&key.section, &key.field, text)
            }
        }
    }
}
