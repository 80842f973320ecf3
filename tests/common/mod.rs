//! In-process stand-in for the local model API

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Value,
}

#[derive(Default)]
pub struct Backend {
    /// Model id to model document
    pub documents: Map<String, Value>,
    /// Section name to schema
    pub schemas: Map<String, Value>,
    pub recent_projects: Vec<Value>,
    pub puts: Vec<Recorded>,
    pub fail_puts: bool,
}

impl Backend {
    /// Model "m1" with the autoStart example in `general`
    pub fn autostart() -> Self {
        let mut backend = Self::default();
        backend.documents.insert(
            "m1".to_string(),
            json!({
                "general": { "autoStart": false, "program": "D-Flow FM", "comments": {} },
                "numerics": { "cflMax": 0.7, "levels": [1, 2], "comments": { "cflmax": "Courant" } },
                "filepath": null
            }),
        );
        backend.schemas.insert(
            "general".to_string(),
            json!({
                "title": "General",
                "properties": {
                    "autoStart": { "type": "boolean" },
                    "program": { "type": "string" }
                }
            }),
        );
        backend.schemas.insert(
            "numerics".to_string(),
            json!({
                "title": "Numerics",
                "properties": {
                    "cflMax": { "type": "number" },
                    "levels": { "items": { "type": "number" } }
                }
            }),
        );
        backend.recent_projects = vec![
            json!({ "project_path": "/data/old/FlowFM.mdu", "last_opened": "2021-01-05T20:12:00" }),
            json!({ "project_path": "/data/new/dimr.xml", "last_opened": "2021-01-05T20:39:00" }),
        ];
        backend
    }
}

type Shared = Arc<Mutex<Backend>>;

pub struct TestBackend {
    pub base_url: String,
    state: Shared,
}

impl TestBackend {
    pub async fn start(backend: Backend) -> Self {
        let state = Arc::new(Mutex::new(backend));
        let app = Router::new()
            .route("/api/models", get(list_models))
            .route("/api/models/:id", get(get_model))
            .route("/api/models/:id/values", put(put_value))
            .route("/api/models/:id/comments", put(put_comment))
            .route("/api/schema/mdu/:section", get(get_schema))
            .route("/api/appdata/recent-projects", get(get_recent).put(touch_recent))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestBackend { base_url, state }
    }

    pub fn puts(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().puts.clone()
    }

    pub fn fail_puts(&self) {
        self.state.lock().unwrap().fail_puts = true;
    }

    pub fn document(&self, model_id: &str) -> Value {
        self.state.lock().unwrap().documents[model_id].clone()
    }

    pub fn recent_projects(&self) -> Vec<Value> {
        self.state.lock().unwrap().recent_projects.clone()
    }
}

async fn list_models(State(state): State<Shared>) -> Json<Value> {
    let backend = state.lock().unwrap();
    let models: Vec<&String> = backend.documents.keys().collect();
    Json(json!({ "models": models }))
}

async fn get_model(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let backend = state.lock().unwrap();
    backend.documents.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_schema(
    State(state): State<Shared>,
    Path(section): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let backend = state.lock().unwrap();
    backend.schemas.get(&section).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn put_value(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut backend = state.lock().unwrap();
    store(&mut backend, format!("/api/models/{}/values", id), query.clone(), body.clone())?;

    let value = body["value"].clone();
    if let Some(section) = section_mut(&mut backend, &id, &query) {
        section.insert(query["field"].clone(), value.clone());
    }
    Ok(Json(json!({ "result": value })))
}

async fn put_comment(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut backend = state.lock().unwrap();
    store(&mut backend, format!("/api/models/{}/comments", id), query.clone(), body.clone())?;

    let value = body["value"].clone();
    if let Some(section) = section_mut(&mut backend, &id, &query) {
        let comments = section.entry("comments").or_insert_with(|| json!({}));
        comments[query["field"].as_str()] = value.clone();
    }
    Ok(Json(json!({ "result": value })))
}

fn store(
    backend: &mut Backend,
    path: String,
    query: HashMap<String, String>,
    body: Value,
) -> Result<(), StatusCode> {
    backend.puts.push(Recorded { path, query, body });
    if backend.fail_puts {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(())
}

fn section_mut<'a>(
    backend: &'a mut Backend,
    id: &str,
    query: &HashMap<String, String>,
) -> Option<&'a mut Map<String, Value>> {
    backend
        .documents
        .get_mut(id)?
        .get_mut(query.get("submodel")?)?
        .as_object_mut()
}

async fn get_recent(State(state): State<Shared>) -> Json<Value> {
    let backend = state.lock().unwrap();
    Json(json!({ "recent_projects": backend.recent_projects }))
}

async fn touch_recent(State(state): State<Shared>, Json(body): Json<Value>) -> StatusCode {
    let mut backend = state.lock().unwrap();
    let path = body["path"].as_str().unwrap_or_default().to_string();
    backend.recent_projects.retain(|p| p["project_path"] != path.as_str());
    backend.recent_projects.insert(
        0,
        json!({ "project_path": path, "last_opened": "2030-01-01T00:00:00" }),
    );
    StatusCode::NO_CONTENT
}
