use flowfm_inspector_core::{ProjectModel, SlotKey};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared, authoritative copy of the loaded project model
#[derive(Clone, Default)]
pub struct ProjectState {
    model: Arc<RwLock<ProjectModel>>,
}

impl ProjectState {
    pub fn new(model: ProjectModel) -> Self {
        Self {
            model: Arc::new(RwLock::new(model)),
        }
    }

    pub async fn model_id(&self) -> String {
        let model = self.model.read().await;
        model.id.clone()
    }

    /// Clone of the whole model (for rendering)
    pub async fn snapshot(&self) -> ProjectModel {
        let model = self.model.read().await;
        model.clone()
    }

    pub async fn replace(&self, project: ProjectModel) {
        let mut model = self.model.write().await;
        *model = project;
    }

    pub async fn value(&self, section: &str, field: &str) -> Option<Value> {
        let model = self.model.read().await;
        model.section(section).and_then(|m| m.value(field)).cloned()
    }

    pub async fn comment(&self, section: &str, field: &str) -> Option<String> {
        let model = self.model.read().await;
        model.section(section).map(|m| m.comment(field).to_string())
    }

    /// Returns `false` if the section is not loaded
    pub async fn set_value(&self, section: &str, field: &str, value: Value) -> bool {
        let mut model = self.model.write().await;
        model.set_value(section, field, value)
    }

    /// Returns `false` if the section is not loaded
    pub async fn set_comment(&self, section: &str, field: &str, comment: &str) -> bool {
        let mut model = self.model.write().await;
        model.set_comment(section, field, comment)
    }

    /// Store `value` in `key`'s place. Returns `false` if the section is not
    /// loaded.
    pub async fn apply(&self, key: &SlotKey, value: &Value) -> bool {
        let mut model = self.model.write().await;
        model.apply(key, value)
    }

    /// Like [`apply`](Self::apply), but only if `admit` agrees. `admit` runs
    /// under the write lock, so admitted writes land in admission order.
    /// Returns `None` when the write was refused.
    pub async fn apply_if(
        &self,
        key: &SlotKey,
        value: &Value,
        admit: impl FnOnce() -> bool,
    ) -> Option<bool> {
        let mut model = self.model.write().await;
        if !admit() {
            return None;
        }
        Some(model.apply(key, value))
    }
}
