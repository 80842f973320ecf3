use super::change_propagator::{ChangePropagator, PropagationError};
use super::project_state::ProjectState;
use super::test_support::FakePort;
use crate::domain::{ModelPort, PropagationEvent};
use flowfm_inspector_core::{FieldValue, ScalarValue, SlotKey, ValueType};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const QUIET: Duration = Duration::from_millis(500);

async fn setup(port: FakePort) -> (Arc<FakePort>, ChangePropagator) {
    let port = Arc::new(port);
    let model = port.get_model("m1").await.unwrap();
    let propagator = ChangePropagator::new(port.clone(), ProjectState::new(model), QUIET);
    (port, propagator)
}

fn boolean(value: bool) -> FieldValue {
    FieldValue::Scalar(ScalarValue::Boolean(value))
}

fn number(value: i64) -> FieldValue {
    FieldValue::Scalar(ScalarValue::Number(value.into()))
}

#[tokio::test(start_paused = true)]
async fn test_single_edit_is_sent_after_quiet_period() {
    let (port, propagator) = setup(FakePort::general()).await;

    propagator.submit("general", "autoStart", &boolean(true), ValueType::Boolean).await;

    // Optimistic value is visible immediately
    assert_eq!(propagator.state().value("general", "autoStart").await, Some(json!(true)));
    tokio::time::sleep(Duration::from_millis(499)).await;
    assert!(port.puts().is_empty());

    tokio::time::sleep(Duration::from_millis(10)).await;
    let puts = port.puts();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].model_id, "m1");
    assert_eq!(puts[0].section, "general");
    assert_eq!(puts[0].field, "autoStart");
    assert_eq!(puts[0].body, json!({ "value": true, "valuetype": "boolean" }));
}

#[tokio::test(start_paused = true)]
async fn test_burst_sends_only_last_value() {
    let (port, propagator) = setup(FakePort::general()).await;

    for value in 1..=5 {
        propagator.submit("general", "count", &number(value), ValueType::Number).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    tokio::time::sleep(Duration::from_millis(600)).await;

    let puts = port.puts();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].body["value"], json!(5));
}

#[tokio::test(start_paused = true)]
async fn test_confirm_sends_immediately_and_cancels_pending() {
    let (port, propagator) = setup(FakePort::general()).await;
    let key = SlotKey::value("general", "autoStart");

    propagator.submit("general", "autoStart", &boolean(true), ValueType::Boolean).await;
    assert!(propagator.is_pending(&key));

    let result = propagator
        .confirm("general", "autoStart", &boolean(false), ValueType::Boolean)
        .await
        .unwrap();
    assert_eq!(result, json!(false));
    assert!(!propagator.is_pending(&key));
    assert_eq!(port.puts().len(), 1);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(port.puts().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slots_debounce_independently() {
    let (port, propagator) = setup(FakePort::general()).await;

    propagator.submit("general", "autoStart", &boolean(true), ValueType::Boolean).await;
    propagator.submit_comment("general", "AutoStart", "switched on").await;
    tokio::time::sleep(Duration::from_millis(600)).await;

    let puts = port.puts();
    assert_eq!(puts.len(), 2);
    let comment = puts.iter().find(|p| p.field == "autostart").unwrap();
    assert_eq!(comment.body, json!({ "value": "switched on" }));
    assert_eq!(
        propagator.state().comment("general", "autostart").await.as_deref(),
        Some("switched on")
    );
}

#[tokio::test(start_paused = true)]
async fn test_failure_keeps_optimistic_value() {
    let port = FakePort::general();
    port.fail_with(500);
    let (port, propagator) = setup(port).await;
    let mut events = propagator.subscribe();

    let err = propagator
        .confirm("general", "autoStart", &boolean(true), ValueType::Boolean)
        .await
        .unwrap_err();

    assert!(matches!(err, PropagationError::Api(_)));
    assert_eq!(propagator.state().value("general", "autoStart").await, Some(json!(true)));
    assert_eq!(port.puts().len(), 1);
    assert!(matches!(events.recv().await.unwrap(), PropagationEvent::Submitted { sequence: 1, .. }));
    assert!(matches!(events.recv().await.unwrap(), PropagationEvent::Failed { sequence: 1, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_is_superseded() {
    let port = FakePort::general();
    port.delay_responses([Duration::from_millis(300), Duration::from_millis(10)]);
    let (_port, propagator) = setup(port).await;

    let (one, two) = (number(1), number(2));
    let slow = propagator.confirm("general", "count", &one, ValueType::Number);
    let fast = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        propagator.confirm("general", "count", &two, ValueType::Number).await
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert!(matches!(slow, Err(PropagationError::Superseded(_))));
    assert_eq!(fast.unwrap(), json!(2));
    assert_eq!(propagator.state().value("general", "count").await, Some(json!(2)));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_drops_pending_and_late_responses() {
    let port = FakePort::general();
    port.delay_responses([Duration::from_millis(100)]);
    let (port, propagator) = setup(port).await;

    // One request in flight, one buffered edit
    let in_flight = {
        let propagator = propagator.clone();
        tokio::spawn(async move {
            propagator
                .confirm("general", "autoStart", &boolean(true), ValueType::Boolean)
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(1)).await;
    propagator.submit("general", "other", &number(3), ValueType::Number).await;

    propagator.shutdown();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(matches!(in_flight.await.unwrap(), Err(PropagationError::ShutDown)));
    assert_eq!(port.puts().len(), 1);

    // New edits are ignored
    propagator.submit("general", "autoStart", &boolean(false), ValueType::Boolean).await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(port.puts().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_flush_all_sends_buffered_edits() {
    let (port, propagator) = setup(FakePort::general()).await;

    propagator.submit("general", "autoStart", &boolean(true), ValueType::Boolean).await;
    propagator.submit_comment("general", "autoStart", "note").await;

    let results = propagator.flush_all().await;
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(port.puts().len(), 2);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(port.puts().len(), 2);
}
