use std::collections::HashMap;
use thiserror::Error;

use crate::config::{ApiSettings, EditorSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_api(&settings.api) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_editor(&settings.editor) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_api(api: &ApiSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if api.base_url.trim().is_empty() {
            errors.push(ValidationError::MissingField("api.base_url".to_string()));
        } else if !(api.base_url.starts_with("http://") || api.base_url.starts_with("https://")) {
            errors.push(ValidationError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: format!("'{}' must start with http:// or https://", api.base_url),
            });
        }

        if api.timeout_seconds == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "api.timeout_seconds".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_editor(editor: &EditorSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if editor.debounce_ms == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "editor.debounce_ms".to_string(),
                reason: "Debounce interval must be greater than 0".to_string(),
            });
        }

        if editor.sections.is_empty() {
            errors.push(ValidationError::MissingField("editor.sections".to_string()));
        }

        let mut seen = HashMap::new();
        for (idx, section) in editor.sections.iter().enumerate() {
            if section.trim().is_empty() {
                errors.push(ValidationError::MissingField(format!("editor.sections[{}]", idx)));
            }
            if let Some(prev_idx) = seen.insert(section.as_str(), idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Section '{}' appears at indices {} and {}",
                    section, prev_idx, idx
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
