//! Change propagation in the browser
//!
//! Edits are written into the shared model signal immediately and buffered
//! per (section, field, kind) slot. A slot that stays quiet for the quiet
//! period is PUT to the backend; the value the backend returns replaces the
//! optimistic one. The confirmation key sends right away.
//!
//! Responses older than one already applied to the same slot are dropped.
//! Once the owning page is cleaned up every timer and late response is a
//! no-op.

use flowfm_inspector_core::api::ValueUpdate;
use flowfm_inspector_core::{Debounce, FieldValue, ProjectModel, SlotKey, SlotSequence, ValueType};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use std::collections::HashMap;

use crate::api;

pub const QUIET_PERIOD_MS: u32 = 500;

#[derive(Clone, Debug, PartialEq)]
enum Change {
    Value { value: Value, value_type: ValueType },
    Comment(String),
}

impl Change {
    fn as_json(&self) -> Value {
        match self {
            Change::Value { value, .. } => value.clone(),
            Change::Comment(text) => Value::String(text.clone()),
        }
    }
}

#[derive(Default)]
struct Slot {
    debounce: Debounce<Change>,
    sequence: SlotSequence,
}

#[derive(Clone, Copy)]
pub struct Propagator {
    model: RwSignal<ProjectModel>,
    slots: StoredValue<HashMap<SlotKey, Slot>>,
    closed: StoredValue<bool>,
    last_error: RwSignal<Option<String>>,
    quiet_ms: u32,
}

impl Propagator {
    pub fn new(model: RwSignal<ProjectModel>) -> Self {
        Self::with_quiet_period(model, QUIET_PERIOD_MS)
    }

    pub fn with_quiet_period(model: RwSignal<ProjectModel>, quiet_ms: u32) -> Self {
        Self {
            model,
            slots: StoredValue::new(HashMap::new()),
            closed: StoredValue::new(false),
            last_error: RwSignal::new(None),
            quiet_ms,
        }
    }

    pub fn model(&self) -> RwSignal<ProjectModel> {
        self.model
    }

    /// Message of the most recent failed submission
    pub fn last_error(&self) -> ReadSignal<Option<String>> {
        self.last_error.read_only()
    }

    pub fn dismiss_error(&self) {
        self.last_error.set(None);
    }

    pub fn submit(&self, section: &str, field: &str, value: &FieldValue, value_type: ValueType) {
        let change = Change::Value {
            value: value.to_json(),
            value_type,
        };
        self.schedule(SlotKey::value(section, field), change);
    }

    pub fn submit_comment(&self, section: &str, field: &str, comment: &str) {
        self.schedule(SlotKey::comment(section, field), Change::Comment(comment.to_string()));
    }

    /// Confirmation key: send now, dropping the buffered edit
    pub fn confirm(&self, section: &str, field: &str, value: &FieldValue, value_type: ValueType) {
        let change = Change::Value {
            value: value.to_json(),
            value_type,
        };
        self.send_now(SlotKey::value(section, field), change);
    }

    pub fn confirm_comment(&self, section: &str, field: &str, comment: &str) {
        self.send_now(SlotKey::comment(section, field), Change::Comment(comment.to_string()));
    }

    pub fn shutdown(&self) {
        self.closed.try_set_value(true);
        self.slots.try_update_value(|slots| {
            for slot in slots.values_mut() {
                slot.debounce.cancel();
            }
        });
    }

    fn is_closed(&self) -> bool {
        self.closed.try_get_value().unwrap_or(true)
    }

    fn schedule(self, key: SlotKey, change: Change) {
        if self.is_closed() {
            return;
        }
        self.apply(&key, &change.as_json());

        let ticket = self.slots.try_update_value(|slots| {
            slots.entry(key.clone()).or_default().debounce.schedule(change)
        });
        let Some(ticket) = ticket else {
            return;
        };

        spawn_local(async move {
            TimeoutFuture::new(self.quiet_ms).await;
            let due = self
                .slots
                .try_update_value(|slots| slots.get_mut(&key).and_then(|slot| slot.debounce.fire(ticket)))
                .flatten();
            if let Some(change) = due {
                self.dispatch(key, change).await;
            }
        });
    }

    fn send_now(self, key: SlotKey, change: Change) {
        if self.is_closed() {
            return;
        }
        self.apply(&key, &change.as_json());
        self.slots.try_update_value(|slots| {
            if let Some(slot) = slots.get_mut(&key) {
                slot.debounce.cancel();
            }
        });
        spawn_local(self.dispatch(key, change));
    }

    fn apply(&self, key: &SlotKey, value: &Value) {
        let _ = self.model.try_update(|model| model.apply(key, value));
    }

    async fn dispatch(self, key: SlotKey, change: Change) {
        if self.is_closed() {
            return;
        }
        let sequence = self
            .slots
            .try_update_value(|slots| slots.entry(key.clone()).or_default().sequence.begin());
        let Some(sequence) = sequence else {
            return;
        };
        let Some(model_id) = self.model.try_with_untracked(|model| model.id.clone()) else {
            return;
        };

        log::debug!("Submitting {} (#{})", key, sequence);
        let response = match &change {
            Change::Value { value, value_type } => {
                let update = ValueUpdate {
                    value: value.clone(),
                    valuetype: *value_type,
                };
                api::put_value(&model_id, &key.section, &key.field, &update).await
            }
            Change::Comment(text) => api::put_comment(&model_id, &key.section, &key.field, text).await,
        };

        if self.is_closed() {
            log::debug!("Ignoring response for {} after shutdown", key);
            return;
        }

        match response {
            Ok(result) => {
                let settled = self
                    .slots
                    .try_update_value(|slots| slots.entry(key.clone()).or_default().sequence.settle(sequence))
                    .unwrap_or(false);
                if !settled {
                    log::debug!("Discarding superseded response for {} (#{})", key, sequence);
                    return;
                }
                self.apply(&key, &result);
                let _ = self.last_error.try_set(None);
            }
            Err(e) => {
                log::warn!("Failed to submit {}: {}", key, e);
                let _ = self
                    .last_error
                    .try_set(Some(format!("Failed to save {}: {}", key, e)));
            }
        }
    }
}
