//! Local API: endpoints and request/response bodies
//!
//! Both the native client and the browser UI talk to the same backend; this
//! module is the single place the URL layout and body shapes are written
//! down.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::schema::ValueType;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Errors talking to the local API
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// Non-success HTTP status
    #[error("{method} {url} failed with status {status}")]
    Http {
        method: String,
        url: String,
        status: u16,
    },

    /// The request did not complete
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body had an unexpected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

// ============================================================================
// Endpoints
// ============================================================================

/// URL builder for the backend routes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn models(&self) -> String {
        format!("{}/api/models", self.base)
    }

    pub fn model(&self, model_id: &str) -> String {
        format!("{}/api/models/{}", self.base, encode(model_id))
    }

    pub fn schema(&self, section: &str) -> String {
        format!("{}/api/schema/mdu/{}", self.base, encode(section))
    }

    pub fn values(&self, model_id: &str, section: &str, field: &str) -> String {
        format!(
            "{}/api/models/{}/values?submodel={}&field={}",
            self.base,
            encode(model_id),
            encode(section),
            encode(field)
        )
    }

    pub fn comments(&self, model_id: &str, section: &str, field: &str) -> String {
        format!(
            "{}/api/models/{}/comments?submodel={}&field={}",
            self.base,
            encode(model_id),
            encode(section),
            encode(field)
        )
    }

    pub fn recent_projects(&self) -> String {
        format!("{}/api/appdata/recent-projects", self.base)
    }
}

fn encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

// ============================================================================
// Bodies
// ============================================================================

/// `GET /api/models`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

/// Body of a value update
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueUpdate {
    pub value: Value,
    pub valuetype: ValueType,
}

/// Body of a comment update
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentUpdate {
    pub value: String,
}

/// Response of both update routes: the value the backend stored
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub result: Value,
}

/// `GET /api/appdata/recent-projects`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentProjectsResponse {
    #[serde(default)]
    pub recent_projects: Vec<RecentProject>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecentProject {
    pub project_path: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_opened: NaiveDateTime,
}

impl RecentProject {
    /// File name of the project, falling back to the whole path
    pub fn file_name(&self) -> &str {
        self.project_path
            .rsplit(['/', '\\'])
            .find(|part| !part.is_empty())
            .unwrap_or(&self.project_path)
    }

    /// Directory part of the project path
    pub fn directory(&self) -> &str {
        let trimmed = self.project_path.trim_end_matches(['/', '\\']);
        match trimmed.rfind(['/', '\\']) {
            Some(idx) => &trimmed[..idx],
            None => "",
        }
    }
}

/// Body of `PUT /api/appdata/recent-projects`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecentProjectUpdate {
    pub path: String,
}

/// Accepts naive ISO timestamps as well as ones with an offset
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(serde::de::Error::custom)
}
