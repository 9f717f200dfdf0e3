//! Concurrent use of one registry and orchestrator

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use parking_lot::Mutex;
use switchyard_core::{
    BackendError, CancellationToken, CooldownTracker, Credentials, EndpointRecord,
    EndpointRegistry, FallbackOrchestrator,
};

fn record(name: &str, target: &str) -> EndpointRecord {
    EndpointRecord::new(name, target, Credentials::api_key(format!("key-{target}")))
}

#[test]
fn test_resolve_cycles_in_insertion_order() {
    let registry = EndpointRegistry::new();
    for target in ["openai/a", "openai/b", "openai/c"] {
        registry.register(record("m", target));
    }

    let targets: Vec<_> = (0..4)
        .map(|_| registry.resolve("m").unwrap().target().to_string())
        .collect();
    assert_eq!(targets, vec!["openai/a", "openai/b", "openai/c", "openai/a"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_spread_evenly() {
    let registry = Arc::new(EndpointRegistry::new());
    for i in 0..4 {
        registry.register(record("pool", &format!("openai/replica-{i}")));
    }
    let router = Arc::new(FallbackOrchestrator::new(
        registry.clone(),
        Arc::new(CooldownTracker::new()),
    ));
    let served: Arc<Mutex<HashMap<String, usize>>> = Arc::default();

    let tasks = (0..8).map(|_| {
        let router = router.clone();
        let served = served.clone();
        tokio::spawn(async move {
            let cancel = CancellationToken::new();
            for _ in 0..50 {
                let routed = router
                    .execute("pool", &[], &cancel, |endpoint, _| async move {
                        tokio::task::yield_now().await;
                        Ok::<_, BackendError>(endpoint.target().to_string())
                    })
                    .await
                    .unwrap();
                *served.lock().entry(routed.value).or_default() += 1;
            }
        })
    });
    for result in join_all(tasks).await {
        result.unwrap();
    }

    let served = served.lock();
    assert_eq!(served.len(), 4);
    assert!(served.values().all(|&count| count == 100));
    assert_eq!(registry.cursor("pool"), Some(400));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_group_swap_is_atomic_for_readers() {
    let registry = Arc::new(EndpointRegistry::new());
    registry
        .replace_group("m", vec![record("m", "old/a"), record("m", "old/b")])
        .unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            tokio::spawn(async move {
                for _ in 0..500 {
                    let target = registry.resolve("m").unwrap().target().to_string();
                    assert!(target.starts_with("old/") || target.starts_with("new/"));
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    for _ in 0..50 {
        registry
            .replace_group("m", vec![record("m", "new/a"), record("m", "new/b")])
            .unwrap();
        registry
            .replace_group("m", vec![record("m", "old/a"), record("m", "old/b")])
            .unwrap();
        tokio::task::yield_now().await;
    }

    for result in join_all(readers).await {
        result.unwrap();
    }
    assert_eq!(registry.count_for("m"), 2);
}

#[tokio::test]
async fn test_independent_groups_do_not_share_cursors() {
    let registry = Arc::new(EndpointRegistry::new());
    registry.register(record("x", "openai/x1"));
    registry.register(record("x", "openai/x2"));
    registry.register(record("y", "openai/y1"));
    registry.register(record("y", "openai/y2"));

    let router = FallbackOrchestrator::new(registry.clone(), Arc::new(CooldownTracker::new()));
    let cancel = CancellationToken::new();
    let calls = (0..6).map(|i| {
        let name = if i % 2 == 0 { "x" } else { "y" };
        router.execute(name, &[], &cancel, |endpoint, _| async move {
            Ok::<_, BackendError>(endpoint.target().to_string())
        })
    });
    let results = join_all(calls).await;
    assert!(results.iter().all(|r| r.is_ok()));

    assert_eq!(registry.cursor("x"), Some(3));
    assert_eq!(registry.cursor("y"), Some(3));
}
