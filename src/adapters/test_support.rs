use async_trait::async_trait;
use flowfm_inspector_core::api::{RecentProject, ValueUpdate};
use flowfm_inspector_core::{ApiError, ProjectModel, Schema};
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// A PUT seen by [`FakePort`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPut {
    pub model_id: String,
    pub section: String,
    pub field: String,
    pub body: Value,
}

/// In-memory [`ModelPort`](crate::domain::ModelPort) that echoes submitted
/// values back as the authoritative result
#[derive(Default)]
pub struct FakePort {
    pub models: Vec<String>,
    pub documents: IndexMap<String, Value>,
    pub schemas: IndexMap<String, Schema>,
    puts: Mutex<Vec<RecordedPut>>,
    delays: Mutex<VecDeque<Duration>>,
    failing_status: Mutex<Option<u16>>,
}

impl FakePort {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single model "m1" with the `general` section of the autoStart example
    pub fn general() -> Self {
        let mut port = Self::new();
        port.models = vec!["m1".to_string()];
        port.documents.insert(
            "m1".to_string(),
            json!({ "general": { "autoStart": false, "comments": {} } }),
        );
        port.schemas.insert(
            "general".to_string(),
            serde_json::from_value(json!({
                "title": "General",
                "properties": { "autoStart": { "type": "boolean" } }
            }))
            .unwrap(),
        );
        port
    }

    /// Delay the next responses by the given durations, in call order
    pub fn delay_responses(&self, delays: impl IntoIterator<Item = Duration>) {
        self.delays.lock().unwrap().extend(delays);
    }

    pub fn fail_with(&self, status: u16) {
        *self.failing_status.lock().unwrap() = Some(status);
    }

    pub fn puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }

    async fn respond(&self, put: RecordedPut, url: String) -> Result<Value, ApiError> {
        let result = put.body["value"].clone();
        self.puts.lock().unwrap().push(put);

        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failing = *self.failing_status.lock().unwrap();
        match failing {
            Some(status) => Err(ApiError::Http {
                method: "PUT".to_string(),
                url,
                status,
            }),
            None => Ok(result),
        }
    }
}

#[async_trait]
impl crate::domain::ModelPort for FakePort {
    async fn list_models(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.models.clone())
    }

    async fn get_model(&self, model_id: &str) -> Result<ProjectModel, ApiError> {
        let document = self.documents.get(model_id).cloned().ok_or_else(|| ApiError::Http {
            method: "GET".to_string(),
            url: format!("/api/models/{}", model_id),
            status: 404,
        })?;
        ProjectModel::from_document(model_id, document).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_schema(&self, section: &str) -> Result<Schema, ApiError> {
        self.schemas.get(section).cloned().ok_or_else(|| ApiError::Http {
            method: "GET".to_string(),
            url: format!("/api/schema/mdu/{}", section),
            status: 404,
        })
    }

    async fn put_value(
        &self,
        model_id: &str,
        section: &str,
        field: &str,
        update: &ValueUpdate,
    ) -> Result<Value, ApiError> {
        let put = RecordedPut {
            model_id: model_id.to_string(),
            section: section.to_string(),
            field: field.to_string(),
            body: serde_json::to_value(update).unwrap(),
        };
        self.respond(put, format!("/api/models/{}/values", model_id)).await
    }

    async fn put_comment(
        &self,
        model_id: &str,
        section: &str,
        field: &str,
        comment: &str,
    ) -> Result<Value, ApiError> {
        let put = RecordedPut {
            model_id: model_id.to_string(),
            section: section.to_string(),
            field: field.to_string(),
            body: json!({ "value": comment }),
        };
        self.respond(put, format!("/api/models/{}/comments", model_id)).await
    }

    async fn recent_projects(&self) -> Result<Vec<RecentProject>, ApiError> {
        Ok(Vec::new())
    }

    async fn touch_recent_project(&self, _path: &str) -> Result<(), ApiError> {
        Ok(())
    }
}
