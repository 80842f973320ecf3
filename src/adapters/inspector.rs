use flowfm_inspector_core::{build_forms, ApiError, ProjectModel, Schema, SectionForm};
use futures::future::join_all;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::ModelPort;

/// Model plus the schemas of its sections, as fetched from the API
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub model: ProjectModel,
    pub schemas: IndexMap<String, Schema>,
}

impl LoadedProject {
    /// Forms for the loaded sections, in display order
    pub fn forms(&self) -> Vec<SectionForm> {
        let sections: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        build_forms(&sections, &self.schemas, &self.model)
    }

    pub fn form(&self, section: &str) -> Option<SectionForm> {
        let schema = self.schemas.get(section)?;
        let model = self.model.section(section)?;
        Some(SectionForm::build(section, schema, model))
    }
}

/// Fetches schemas and models for a list of sections
pub struct Inspector {
    port: Arc<dyn ModelPort>,
    sections: Vec<String>,
}

impl Inspector {
    pub fn new(port: Arc<dyn ModelPort>, sections: Vec<String>) -> Self {
        Self { port, sections }
    }

    pub fn port(&self) -> Arc<dyn ModelPort> {
        self.port.clone()
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// `requested` if given, otherwise the first model the API lists
    pub async fn resolve_model(&self, requested: Option<&str>) -> anyhow::Result<String> {
        if let Some(model_id) = requested {
            return Ok(model_id.to_string());
        }
        let models = self.port.list_models().await?;
        models
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("The API has no models loaded"))
    }

    /// Load the model and, concurrently, the schema of every configured
    /// section. Sections without a schema are left out.
    pub async fn load(&self, model_id: &str) -> Result<LoadedProject, ApiError> {
        self.load_sections(model_id, &self.sections).await
    }

    pub async fn load_sections(
        &self,
        model_id: &str,
        sections: &[String],
    ) -> Result<LoadedProject, ApiError> {
        let schema_requests = sections.iter().map(|section| async move {
            (section.clone(), self.port.get_schema(section).await)
        });
        let (model, schemas) = futures::join!(self.port.get_model(model_id), join_all(schema_requests));
        let model = model?;

        let mut loaded = IndexMap::new();
        for (section, schema) in schemas {
            match schema {
                Ok(schema) => {
                    loaded.insert(section, schema);
                }
                Err(ApiError::Http { status, .. }) => {
                    warn!(section = %section, status, "No schema for section, skipping");
                }
                Err(e) => return Err(e),
            }
        }

        info!(model = %model_id, sections = loaded.len(), "Loaded project");
        Ok(LoadedProject {
            model,
            schemas: loaded,
        })
    }
}
