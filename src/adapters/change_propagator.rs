//! Debounced, optimistic change propagation
//!
//! Every edit is written into the [`ProjectState`] right away and buffered in
//! a per-slot [`Debounce`]. When the slot stays quiet for the configured
//! period the last buffered value is PUT to the backend and the value it
//! returns replaces the optimistic one. A confirmation sends immediately and
//! drops whatever was buffered for the slot.
//!
//! Requests are never cancelled. Each one carries a per-slot sequence number
//! and a response older than one already applied is discarded.

use flowfm_inspector_core::api::ValueUpdate;
use flowfm_inspector_core::{ApiError, Debounce, FieldValue, SlotKey, SlotSequence, ValueType};
use futures::future::join_all;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::adapters::project_state::ProjectState;
use crate::domain::{ModelPort, PropagationEvent};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("response for {0} was superseded by a newer one")]
    Superseded(SlotKey),

    #[error("change propagator has been shut down")]
    ShutDown,
}

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

struct Inner {
    port: Arc<dyn ModelPort>,
    state: ProjectState,
    quiet_period: Duration,
    slots: Mutex<HashMap<SlotKey, Slot>>,
    events: broadcast::Sender<PropagationEvent>,
    closed: AtomicBool,
}

#[derive(Clone)]
pub struct ChangePropagator {
    inner: Arc<Inner>,
}

impl ChangePropagator {
    pub fn new(port: Arc<dyn ModelPort>, state: ProjectState, quiet_period: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                port,
                state,
                quiet_period,
                slots: Mutex::new(HashMap::new()),
                events,
                closed: AtomicBool::new(false),
            }),
        }
    }

    pub fn state(&self) -> &ProjectState {
        &self.inner.state
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PropagationEvent> {
        self.inner.events.subscribe()
    }

    /// Debounced value edit
    pub async fn submit(&self, section: &str, field: &str, value: &FieldValue, value_type: ValueType) {
        let change = Change::Value {
            value: value.to_json(),
            value_type,
        };
        self.schedule(SlotKey::value(section, field), change).await;
    }

    /// Debounced comment edit
    pub async fn submit_comment(&self, section: &str, field: &str, comment: &str) {
        self.schedule(SlotKey::comment(section, field), Change::Comment(comment.to_string()))
            .await;
    }

    /// Send a value immediately, dropping any buffered edit of the field
    pub async fn confirm(
        &self,
        section: &str,
        field: &str,
        value: &FieldValue,
        value_type: ValueType,
    ) -> Result<Value, PropagationError> {
        let change = Change::Value {
            value: value.to_json(),
            value_type,
        };
        self.send_now(SlotKey::value(section, field), change).await
    }

    /// Send a comment immediately, dropping any buffered edit of it
    pub async fn confirm_comment(
        &self,
        section: &str,
        field: &str,
        comment: &str,
    ) -> Result<Value, PropagationError> {
        self.send_now(SlotKey::comment(section, field), Change::Comment(comment.to_string()))
            .await
    }

    /// Send every buffered edit now and wait for the responses
    pub async fn flush_all(&self) -> Vec<Result<Value, PropagationError>> {
        let due: Vec<(SlotKey, Change)> = {
            let mut slots = self.lock_slots();
            slots
                .iter_mut()
                .filter_map(|(key, slot)| slot.debounce.flush().map(|change| (key.clone(), change)))
                .collect()
        };
        join_all(due.into_iter().map(|(key, change)| self.dispatch(key, change))).await
    }

    pub fn is_pending(&self, key: &SlotKey) -> bool {
        self.lock_slots()
            .get(key)
            .map(|slot| slot.debounce.is_pending())
            .unwrap_or(false)
    }

    /// Stop propagating. Buffered edits are dropped, running timers become
    /// no-ops and responses still in flight are ignored.
    pub fn shutdown(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        for slot in self.lock_slots().values_mut() {
            slot.debounce.cancel();
        }
        debug!("Change propagator shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<SlotKey, Slot>> {
        self.inner.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn schedule(&self, key: SlotKey, change: Change) {
        if self.is_shut_down() {
            debug!(slot = %key, "Ignoring edit after shutdown");
            return;
        }
        self.apply_optimistic(&key, &change).await;

        let ticket = self
            .lock_slots()
            .entry(key.clone())
            .or_default()
            .debounce
            .schedule(change);

        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.inner.quiet_period).await;
            let due = this
                .lock_slots()
                .get_mut(&key)
                .and_then(|slot| slot.debounce.fire(ticket));
            if let Some(change) = due {
                // Outcome is reported through events and the log
                let _ = this.dispatch(key, change).await;
            }
        });
    }

    async fn send_now(&self, key: SlotKey, change: Change) -> Result<Value, PropagationError> {
        if self.is_shut_down() {
            return Err(PropagationError::ShutDown);
        }
        self.apply_optimistic(&key, &change).await;
        if let Some(slot) = self.lock_slots().get_mut(&key) {
            slot.debounce.cancel();
        }
        self.dispatch(key, change).await
    }

    async fn apply_optimistic(&self, key: &SlotKey, change: &Change) {
        if !self.inner.state.apply(key, &change.as_json()).await {
            debug!(slot = %key, "Section is not loaded, skipping optimistic update");
        }
    }

    async fn dispatch(&self, key: SlotKey, change: Change) -> Result<Value, PropagationError> {
        if self.is_shut_down() {
            return Err(PropagationError::ShutDown);
        }

        let sequence = self.lock_slots().entry(key.clone()).or_default().sequence.begin();
        let model_id = self.inner.state.model_id().await;

        debug!(slot = %key, sequence, "Submitting change");
        self.emit(PropagationEvent::Submitted {
            slot: key.clone(),
            sequence,
        });

        let port = &self.inner.port;
        let response = match &change {
            Change::Value { value, value_type } => {
                let update = ValueUpdate {
                    value: value.clone(),
                    valuetype: *value_type,
                };
                port.put_value(&model_id, &key.section, &key.field, &update).await
            }
            Change::Comment(text) => port.put_comment(&model_id, &key.section, &key.field, text).await,
        };

        if self.is_shut_down() {
            debug!(slot = %key, sequence, "Ignoring response after shutdown");
            return Err(PropagationError::ShutDown);
        }

        match response {
            Ok(result) => {
                let settled = self
                    .inner
                    .state
                    .apply_if(&key, &result, || {
                        self.lock_slots().entry(key.clone()).or_default().sequence.settle(sequence)
                    })
                    .await;
                if settled.is_none() {
                    debug!(slot = %key, sequence, "Discarding superseded response");
                    self.emit(PropagationEvent::Superseded {
                        slot: key.clone(),
                        sequence,
                    });
                    return Err(PropagationError::Superseded(key));
                }

                self.emit(PropagationEvent::Reconciled {
                    slot: key,
                    sequence,
                    value: result.clone(),
                });
                Ok(result)
            }
            Err(error) => {
                warn!(slot = %key, sequence, error = %error, "Failed to submit change");
                self.emit(PropagationEvent::Failed {
                    slot: key,
                    sequence,
                    error: error.clone(),
                });
                Err(error.into())
            }
        }
    }

    fn emit(&self, event: PropagationEvent) {
        // No subscribers is fine
        let _ = self.inner.events.send(event);
    }
}
