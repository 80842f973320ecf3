use async_trait::async_trait;
use flowfm_inspector_core::api::{
    CommentUpdate, ModelsResponse, RecentProject, RecentProjectUpdate, RecentProjectsResponse,
    UpdateResult, ValueUpdate,
};
use flowfm_inspector_core::{ApiError, Endpoints, ProjectModel, Schema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::Settings;
use crate::domain::ModelPort;

/// [`ModelPort`] over the local HTTP API
#[derive(Clone)]
pub struct HttpModelClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpModelClient {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client, endpoints })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        Self::new(settings.endpoints(), settings.timeout())
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode("GET", url, response).await
    }

    async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: String,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode("PUT", url, response).await
    }

    async fn decode<T: DeserializeOwned>(
        method: &str,
        url: String,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = Self::check_status(method, url, &response)?;
        debug!("{} {}", method, status);
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn check_status(
        method: &str,
        url: String,
        response: &reqwest::Response,
    ) -> Result<reqwest::StatusCode, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                method: method.to_string(),
                url,
                status: status.as_u16(),
            });
        }
        Ok(status)
    }
}

#[async_trait]
impl ModelPort for HttpModelClient {
    async fn list_models(&self) -> Result<Vec<String>, ApiError> {
        let response: ModelsResponse = self.get_json(self.endpoints.models()).await?;
        Ok(response.models)
    }

    async fn get_model(&self, model_id: &str) -> Result<ProjectModel, ApiError> {
        let document: Value = self.get_json(self.endpoints.model(model_id)).await?;
        ProjectModel::from_document(model_id, document).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_schema(&self, section: &str) -> Result<Schema, ApiError> {
        self.get_json(self.endpoints.schema(section)).await
    }

    async fn put_value(
        &self,
        model_id: &str,
        section: &str,
        field: &str,
        update: &ValueUpdate,
    ) -> Result<Value, ApiError> {
        let url = self.endpoints.values(model_id, section, field);
        let response: UpdateResult = self.put_json(url, update).await?;
        Ok(response.result)
    }

    async fn put_comment(
        &self,
        model_id: &str,
        section: &str,
        field: &str,
        comment: &str,
    ) -> Result<Value, ApiError> {
        let url = self.endpoints.comments(model_id, section, field);
        let body = CommentUpdate {
            value: comment.to_string(),
        };
        let response: UpdateResult = self.put_json(url, &body).await?;
        Ok(response.result)
    }

    async fn recent_projects(&self) -> Result<Vec<RecentProject>, ApiError> {
        let response: RecentProjectsResponse = self.get_json(self.endpoints.recent_projects()).await?;
        Ok(response.recent_projects)
    }

    async fn touch_recent_project(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoints.recent_projects();
        debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .json(&RecentProjectUpdate {
                path: path.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::check_status("PUT", url, &response)?;
        Ok(())
    }
}
