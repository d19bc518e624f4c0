use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use analytics_store::service::{AnalyticsRequest, CreateProjectRequest, Empty};
use analytics_store::{
    Analytics, Error, InMemoryKvStore, KvStore, LockScope, Session, Tenant, TrackConfig,
};

use crate::support::{analytics, analytics_over, NOW};

/// Poll until the counter reaches `expected`; tracking is applied off-thread.
fn wait_for_value(analytics: &Analytics<InMemoryKvStore>, session: &Session, name: &str, expected: i64) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = analytics.get(session, AnalyticsRequest::new(name)) {
            if resp.counter.value == expected {
                return;
            }
        }
        assert!(Instant::now() < deadline, "counter {name} never reached {expected}");
        thread::sleep(Duration::from_millis(5));
    }
}

// ============================================================================
// Track
// ============================================================================

#[test]
fn track_creates_then_increments() {
    let (analytics, _, _) = analytics();
    let session = Session::new();

    analytics.track(&session, AnalyticsRequest::new("signups")).unwrap();
    wait_for_value(&analytics, &session, "signups", 1);

    let counter = analytics
        .get(&session, AnalyticsRequest::new("signups"))
        .unwrap()
        .counter;
    assert_eq!(counter.name, "signups");
    assert_eq!(counter.created, NOW);

    analytics.track(&session, AnalyticsRequest::new("signups")).unwrap();
    wait_for_value(&analytics, &session, "signups", 2);

    let stats = analytics.shutdown();
    assert_eq!(stats.applied, 2);
    assert_eq!(stats.dropped, 0);
}

#[test]
fn concurrent_track_through_worker_pool_loses_nothing() {
    const CALLERS: usize = 8;
    const PER_CALLER: usize = 50;

    let store = InMemoryKvStore::new();
    let (analytics, _) = analytics_over(
        store.clone(),
        TrackConfig {
            workers: 4,
            ..Default::default()
        },
    );
    let analytics = Arc::new(analytics);

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let analytics = analytics.clone();
            thread::spawn(move || {
                let session = Session::new();
                for _ in 0..PER_CALLER {
                    analytics.track(&session, AnalyticsRequest::new("hits")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let analytics = Arc::try_unwrap(analytics).ok().unwrap();
    let counters = analytics.counters().clone();
    let stats = analytics.shutdown();
    assert_eq!(stats.applied, CALLERS * PER_CALLER);

    let counter = counters.get(&Tenant::default(), "hits").unwrap();
    assert_eq!(counter.value, (CALLERS * PER_CALLER) as i64);
}

#[test]
fn concurrent_increment_from_many_threads_is_exact() {
    const THREADS: usize = 16;
    const PER_THREAD: usize = 25;

    for scope in [LockScope::PerKey, LockScope::Global] {
        let (analytics, _) = analytics_over(
            InMemoryKvStore::new(),
            TrackConfig {
                lock_scope: scope,
                ..Default::default()
            },
        );
        let counters = analytics.counters().clone();

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let counters = counters.clone();
                thread::spawn(move || {
                    for _ in 0..PER_THREAD {
                        counters.increment(&Tenant::default(), "race").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let counter = counters.get(&Tenant::default(), "race").unwrap();
        assert_eq!(counter.value, (THREADS * PER_THREAD) as i64, "{scope:?}");
        analytics.shutdown();
    }
}

#[test]
fn track_with_empty_name_is_rejected() {
    let (analytics, store, _) = analytics();
    let err = analytics
        .track(&Session::new(), AnalyticsRequest::default())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    assert_eq!(analytics.shutdown().applied, 0);
    assert!(store.is_empty());
}

#[test]
fn track_with_entity_shaped_name_is_dropped_silently() {
    let (analytics, store, _) = analytics();

    analytics
        .track(&Session::new(), AnalyticsRequest::new("p:project"))
        .unwrap();

    let stats = analytics.shutdown();
    assert_eq!(stats.applied, 0);
    assert_eq!(stats.dropped, 1);
    assert!(store.is_empty());
}

// ============================================================================
// Get / Delete / List
// ============================================================================

#[test]
fn get_and_delete_counter() {
    let (analytics, _, _) = analytics();
    let session = Session::new();
    analytics.counters().increment(&Tenant::default(), "visits").unwrap();

    let deleted = analytics
        .delete(&session, AnalyticsRequest::new("visits"))
        .unwrap()
        .counter;
    assert_eq!(deleted.value, 1);

    let err = analytics
        .get(&session, AnalyticsRequest::new("visits"))
        .unwrap_err();
    assert_eq!(err, Error::NotFound("counter not found".into()));

    let err = analytics
        .delete(&session, AnalyticsRequest::new("visits"))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn get_without_name_is_invalid() {
    let (analytics, _, _) = analytics();
    let err = analytics
        .get(&Session::new(), AnalyticsRequest::default())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn list_counters_skips_projects_and_actions() {
    let (analytics, store, _) = analytics();
    let session = Session::new();
    let tenant = Tenant::default();

    assert!(analytics.list(&session, Empty {}).unwrap().counters.is_empty());

    analytics
        .create_project(
            &session,
            CreateProjectRequest {
                name: "P".into(),
                ..Default::default()
            },
        )
        .unwrap();
    analytics.counters().increment(&tenant, "a").unwrap();
    analytics.counters().increment(&tenant, "b").unwrap();
    analytics.counters().increment(&tenant, "b").unwrap();
    assert_eq!(store.len(), 3);

    let mut counters: Vec<(String, i64)> = analytics
        .list(&session, Empty {})
        .unwrap()
        .counters
        .into_iter()
        .map(|c| (c.name, c.value))
        .collect();
    counters.sort();
    assert_eq!(counters, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
}

#[test]
fn list_counters_fails_on_undecodable_record() {
    let (analytics, store, _) = analytics();
    analytics.counters().increment(&Tenant::default(), "ok").unwrap();
    store.write("default:broken", b"not json".to_vec()).unwrap();

    let err = analytics.list(&Session::new(), Empty {}).unwrap_err();
    assert!(matches!(err, Error::Internal(_)));
}
