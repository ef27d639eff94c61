use std::sync::Arc;
use std::time::Duration;

use engage_core::model::{ModuleId, ScrollGeometry, TrackerPhase};
use serde_json::{Value, json};
use services::{
    DEFAULT_SYNC_INTERVAL, EngageServices, FlushOutcome, Method, ScriptedTransport, StaticToken,
};

const PROGRESS_PATH: &str = "/api/modules/3/update-progress";

fn services(transport: &ScriptedTransport) -> EngageServices {
    EngageServices::new(
        Arc::new(transport.clone()),
        Arc::new(StaticToken::new("learner-token")),
        DEFAULT_SYNC_INTERVAL,
    )
}

fn body(request: services::api::ApiRequest) -> Value {
    request.body.unwrap_or(Value::Null)
}

#[tokio::test(start_paused = true)]
async fn tick_reports_minutes_and_unload_reports_zero() {
    let transport = ScriptedTransport::new();
    transport.respond(Method::Post, PROGRESS_PATH, 200, json!({"success": true}));
    let services = services(&transport);

    let tracker = services.progress_tracker(ModuleId::new(3));
    tracker.on_scroll(ScrollGeometry::new(500.0, 1_500.0, 500.0));

    tokio::time::advance(Duration::from_secs(60)).await;
    assert_eq!(tracker.on_interval_tick().await, FlushOutcome::Sent);

    tokio::time::advance(Duration::from_secs(65)).await;
    assert_eq!(tracker.on_unload().await, FlushOutcome::Sent);

    let requests = transport.requests_to(PROGRESS_PATH);
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.bearer.as_deref() == Some("learner-token")));
    let bodies: Vec<Value> = requests.into_iter().map(body).collect();
    assert_eq!(
        bodies,
        vec![
            json!({"progress": 50.0, "time_spent": 1}),
            json!({"progress": 50.0, "time_spent": 0}),
        ]
    );
    assert_eq!(tracker.phase(), TrackerPhase::Flushed);
}

#[tokio::test(start_paused = true)]
async fn failed_sync_is_silent() {
    let transport = ScriptedTransport::new();
    transport.fail(Method::Post, PROGRESS_PATH, "connection reset");
    let services = services(&transport);
    let tracker = services.progress_tracker(ModuleId::new(3));

    tokio::time::advance(Duration::from_secs(60)).await;
    assert_eq!(tracker.on_interval_tick().await, FlushOutcome::Failed);
    assert_eq!(tracker.on_unload().await, FlushOutcome::Failed);

    assert!(services.toasts().is_empty());
    assert_eq!(transport.requests_to(PROGRESS_PATH).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn server_error_during_sync_is_silent() {
    let transport = ScriptedTransport::new();
    transport.respond(Method::Post, PROGRESS_PATH, 500, json!({"error": "db down"}));
    let services = services(&transport);
    let tracker = services.progress_tracker(ModuleId::new(3));

    assert_eq!(tracker.flush(0).await, FlushOutcome::Failed);
    assert!(services.toasts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn running_session_ticks_then_flushes_on_drop() {
    let transport = ScriptedTransport::new();
    transport.respond(Method::Post, PROGRESS_PATH, 200, json!({}));
    let services = services(&transport);
    let tracker = services.progress_tracker(ModuleId::new(3));
    tracker.on_scroll(ScrollGeometry::new(1_000.0, 1_500.0, 500.0));

    let session = tracker.start(Duration::from_secs(60));

    let first = transport.next_request().await;
    assert_eq!(body(first), json!({"progress": 100.0, "time_spent": 1}));
    let second = transport.next_request().await;
    assert_eq!(body(second), json!({"progress": 100.0, "time_spent": 2}));

    drop(session);
    let last = transport.next_request().await;
    assert_eq!(body(last), json!({"progress": 100.0, "time_spent": 0}));
    assert!(!tracker.is_active());
}

#[tokio::test(start_paused = true)]
async fn closed_session_stops_ticking() {
    let transport = ScriptedTransport::new();
    transport.respond(Method::Post, PROGRESS_PATH, 200, json!({}));
    let services = services(&transport);
    let tracker = services.progress_tracker(ModuleId::new(3));

    let session = tracker.start(services.sync_interval());
    assert_eq!(session.close().await, FlushOutcome::Sent);

    tokio::time::sleep(Duration::from_secs(300)).await;
    assert_eq!(transport.requests_to(PROGRESS_PATH).len(), 1);
    assert_eq!(tracker.flush(5).await, FlushOutcome::Skipped);
}

#[tokio::test]
async fn fitting_document_counts_as_read() {
    let transport = ScriptedTransport::new();
    let services = services(&transport);
    let tracker = services.progress_tracker(ModuleId::new(3));

    let percent = tracker
        .on_scroll(ScrollGeometry::new(0.0, 700.0, 700.0))
        .unwrap();
    assert!((0.0..=100.0).contains(&percent.value()));
    assert!(transport.requests().is_empty());
}
