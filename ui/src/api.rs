//! API client for the FlowFM inspector backend

use flowfm_inspector_core::api::{
    CommentUpdate, ModelsResponse, RecentProject, RecentProjectUpdate, RecentProjectsResponse,
    UpdateResult, ValueUpdate, DEFAULT_BASE_URL,
};
use flowfm_inspector_core::{Endpoints, ProjectModel, Schema};
use gloo_net::http::{Request, Response};
use serde_json::Value;

const API_BASE: &str = DEFAULT_BASE_URL;

fn endpoints() -> Endpoints {
    Endpoints::new(API_BASE)
}

/// Identifiers of the loaded models
pub async fn list_models() -> Result<Vec<String>, String> {
    let response: ModelsResponse = fetch_json(&endpoints().models()).await?;
    Ok(response.models)
}

/// All sections of a model
pub async fn get_model(model_id: &str) -> Result<ProjectModel, String> {
    let document: Value = fetch_json(&endpoints().model(model_id)).await?;
    ProjectModel::from_document(model_id, document)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Schema of one MDU section
pub async fn get_schema(section: &str) -> Result<Schema, String> {
    fetch_json(&endpoints().schema(section)).await
}

/// Store a field value and return the value the backend kept
pub async fn put_value(
    model_id: &str,
    section: &str,
    field: &str,
    update: &ValueUpdate,
) -> Result<Value, String> {
    let url = endpoints().values(model_id, section, field);
    let response: UpdateResult = put_json(&url, update).await?;
    Ok(response.result)
}

/// Store a field comment and return the comment the backend kept
pub async fn put_comment(
    model_id: &str,
    section: &str,
    field: &str,
    comment: &str,
) -> Result<Value, String> {
    let url = endpoints().comments(model_id, section, field);
    let body = CommentUpdate {
        value: comment.to_string(),
    };
    let response: UpdateResult = put_json(&url, &body).await?;
    Ok(response.result)
}

pub async fn recent_projects() -> Result<Vec<RecentProject>, String> {
    let response: RecentProjectsResponse = fetch_json(&endpoints().recent_projects()).await?;
    Ok(response.recent_projects)
}

/// Mark a project as just opened
pub async fn touch_recent_project(path: &str) -> Result<(), String> {
    let body = RecentProjectUpdate {
        path: path.to_string(),
    };
    let response = Request::put(&endpoints().recent_projects())
        .json(&body)
        .map_err(|e| format!("Failed to serialize body: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    check_status(&response)
}

// ============================================================================
// Helpers
// ============================================================================

fn check_status(response: &Response) -> Result<(), String> {
    if response.ok() {
        Ok(())
    } else {
        Err(format!(
            "{} failed with status {}",
            response.url(),
            response.status()
        ))
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    check_status(&response)?;

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

async fn put_json<T: serde::Serialize, R: serde::de::DeserializeOwned>(
    url: &str,
    body: &T,
) -> Result<R, String> {
    let response = Request::put(url)
        .json(body)
        .map_err(|e| format!("Failed to serialize body: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    check_status(&response)?;

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
