use async_trait::async_trait;
use flowfm_inspector_core::api::{RecentProject, ValueUpdate};
use flowfm_inspector_core::{ApiError, ProjectModel, Schema, SlotKey};
use serde_json::Value;

/// Access to the local model API
#[async_trait]
pub trait ModelPort: Send + Sync {
    async fn list_models(&self) -> Result<Vec<String>, ApiError>;
    async fn get_model(&self, model_id: &str) -> Result<ProjectModel, ApiError>;
    async fn get_schema(&self, section: &str) -> Result<Schema, ApiError>;

    /// Store a field value; returns the value the backend kept
    async fn put_value(
        &self,
        model_id: &str,
        section: &str,
        field: &str,
        update: &ValueUpdate,
    ) -> Result<Value, ApiError>;

    /// Store a field comment; returns the comment the backend kept
    async fn put_comment(
        &self,
        model_id: &str,
        section: &str,
        field: &str,
        comment: &str,
    ) -> Result<Value, ApiError>;

    async fn recent_projects(&self) -> Result<Vec<RecentProject>, ApiError>;
    async fn touch_recent_project(&self, path: &str) -> Result<(), ApiError>;
}

/// Progress of one submission through the change propagator
#[derive(Debug, Clone, PartialEq)]
pub enum PropagationEvent {
    /// A PUT was sent for the slot
    Submitted { slot: SlotKey, sequence: u64 },
    /// The backend answered and its value replaced the optimistic one
    Reconciled { slot: SlotKey, sequence: u64, value: Value },
    /// The PUT failed; the optimistic value stays in place
    Failed { slot: SlotKey, sequence: u64, error: ApiError },
    /// A newer response for the slot was already applied
    Superseded { slot: SlotKey, sequence: u64 },
}

impl PropagationEvent {
    pub fn slot(&self) -> &SlotKey {
        match self {
            PropagationEvent::Submitted { slot, .. }
            | PropagationEvent::Reconciled { slot, .. }
            | PropagationEvent::Failed { slot, .. }
            | PropagationEvent::Superseded { slot, .. } => slot,
        }
    }
}
