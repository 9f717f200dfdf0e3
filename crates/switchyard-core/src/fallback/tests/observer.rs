//! Attempt events

use mockall::Sequence;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::{ScriptedBackend, orchestrator, record};
use crate::classify::{BackendError, ErrorKind};
use crate::fallback::{AttemptEvent, AttemptOutcome, AttemptRecord, MockAttemptObserver, SkipReason};
use crate::registry::{Credentials, EndpointId};

#[tokio::test(start_paused = true)]
async fn test_observer_sees_every_attempt_in_order() {
    let mut observer = MockAttemptObserver::new();
    let mut seq = Sequence::new();
    observer
        .expect_on_attempt()
        .withf(|e| {
            e.candidate == "p"
                && e.outcome == "retriable_failure"
                && e.error_kind == Some(ErrorKind::ServerError)
                && e.endpoint.starts_with("openai/p#")
        })
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    observer
        .expect_on_attempt()
        .withf(|e| e.candidate == "f" && e.outcome == "success" && e.error_kind.is_none())
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let router = orchestrator(vec![record("p", "openai/p"), record("f", "openai/f")])
        .with_observer(Arc::new(observer));
    let backend = ScriptedBackend::default();
    backend.answer("openai/p", Err(BackendError::http(500, "boom")));
    backend.answer("openai/f", Ok("ok"));

    let routed = router
        .execute("p", &["f"], &CancellationToken::new(), |endpoint, _| {
            let backend = backend.clone();
            async move { backend.call(&endpoint) }
        })
        .await
        .unwrap();
    assert_eq!(routed.attempts.len(), 2);
}

#[test]
fn test_event_serialization() {
    let skipped = AttemptRecord::skipped("p", SkipReason::Cooldown, Some(ErrorKind::RateLimit));
    let value = serde_json::to_value(AttemptEvent::from(&skipped)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "candidate": "p",
            "endpoint": "skipped-cooldown",
            "outcome": "skipped_cooldown",
            "error_kind": "rate_limit",
            "elapsed_ms": 0,
        })
    );

    let throttled = AttemptRecord::skipped("p", SkipReason::Throttled, None);
    let event = AttemptEvent::from(&throttled);
    assert_eq!(event.endpoint, "skipped-throttled");

    let id = EndpointId::derive("openai/gpt-4o", &Credentials::api_key("k"));
    let success = AttemptRecord::called(
        "p",
        &id,
        AttemptOutcome::Success,
        None,
        std::time::Duration::from_millis(42),
    );
    let value = serde_json::to_value(AttemptEvent::from(&success)).unwrap();
    assert_eq!(value["endpoint"], id.as_str());
    assert_eq!(value["elapsed_ms"], 42);
    assert!(value.get("error_kind").is_none());
}
