//! Integration Tests for the Cache Layer
//!
//! Exercises every public operation through the trait object produced by
//! the driver factory, timed TTL behavior included.

use std::sync::Arc;
use std::time::Duration;

use waf_cache::{from_config, Cache, Config, Ttl};

// == Helper Functions ==

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waf_cache=debug".into()),
        )
        .try_init();
}

async fn create_test_cache() -> Arc<dyn Cache> {
    init_tracing();
    let config = Config::default();
    let (cache, reaper) = from_config(&config)
        .await
        .expect("memory driver construction cannot fail");
    // These tests drive expiry through reads; the reaper would only race them
    if let Some(reaper) = reaper {
        reaper.abort();
    }
    cache
}

// == Set / Get ==

#[tokio::test]
async fn test_set_then_get_returns_value() {
    let cache = create_test_cache().await;

    cache
        .set("classify:GET:/login", b"allow", Some(Duration::from_secs(5)))
        .await;

    assert_eq!(
        cache.get("classify:GET:/login").await,
        Some(b"allow".to_vec())
    );
}

#[tokio::test]
async fn test_get_never_set_key_misses() {
    let cache = create_test_cache().await;

    assert_eq!(cache.get("never-set").await, None);
}

#[tokio::test]
async fn test_set_overwrites_existing_entry() {
    let cache = create_test_cache().await;

    cache.set("key", b"first", None).await;
    cache.set("key", b"second", None).await;

    assert_eq!(cache.get("key").await, Some(b"second".to_vec()));
}

#[tokio::test]
async fn test_empty_value_roundtrip() {
    let cache = create_test_cache().await;

    cache.set("empty", b"", None).await;

    assert_eq!(cache.get("empty").await, Some(Vec::new()));
}

#[tokio::test]
async fn test_entry_expires_after_ttl() {
    let cache = create_test_cache().await;

    cache
        .set("short-lived", b"value", Some(Duration::from_millis(80)))
        .await;
    assert!(cache.get("short-lived").await.is_some());

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(cache.get("short-lived").await, None);
}

#[tokio::test]
async fn test_overwrite_resets_ttl() {
    let cache = create_test_cache().await;

    cache
        .set("key", b"first", Some(Duration::from_millis(80)))
        .await;
    cache.set("key", b"second", None).await;

    tokio::time::sleep(Duration::from_millis(150)).await;

    // The overwrite replaced the expiring entry with a persistent one
    assert_eq!(cache.get("key").await, Some(b"second".to_vec()));
}

// == Pop ==

#[tokio::test]
async fn test_pop_consumes_entry_exactly_once() {
    let cache = create_test_cache().await;

    cache
        .set("nonce", b"one-shot", Some(Duration::from_secs(5)))
        .await;

    assert_eq!(cache.pop("nonce").await, Some(b"one-shot".to_vec()));
    assert_eq!(cache.get("nonce").await, None);
    assert_eq!(cache.pop("nonce").await, None);
}

// == Remove ==

#[tokio::test]
async fn test_remove_deletes_entry() {
    let cache = create_test_cache().await;

    cache.set("key", b"value", None).await;
    cache.remove("key").await;

    assert_eq!(cache.get("key").await, None);
}

#[tokio::test]
async fn test_remove_absent_key_is_a_noop() {
    let cache = create_test_cache().await;

    cache.set("other", b"value", None).await;

    // Removing a key that was never set must not disturb anything
    cache.remove("absent").await;
    cache.remove("absent").await;

    assert_eq!(cache.get("other").await, Some(b"value".to_vec()));
}

// == Remove By Prefix ==

#[tokio::test]
async fn test_remove_by_prefix_is_selective() {
    let cache = create_test_cache().await;

    cache.set("user:1", b"a", None).await;
    cache.set("user:2", b"b", None).await;
    cache.set("admin:1", b"c", None).await;

    cache.remove_by_prefix("user:").await;

    assert_eq!(cache.get("user:1").await, None);
    assert_eq!(cache.get("user:2").await, None);
    assert_eq!(cache.get("admin:1").await, Some(b"c".to_vec()));
}

// == Get TTL ==

#[tokio::test]
async fn test_get_ttl_bounded_entry() {
    let cache = create_test_cache().await;

    cache
        .set("bounded", b"value", Some(Duration::from_secs(5)))
        .await;

    match cache.get_ttl("bounded").await {
        Some(Ttl::Bounded(remaining)) => {
            assert!(remaining > Duration::ZERO);
            assert!(remaining <= Duration::from_secs(5));
        }
        other => panic!("expected bounded ttl, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_ttl_persistent_entry() {
    let cache = create_test_cache().await;

    cache.set("persistent", b"value", None).await;

    assert_eq!(cache.get_ttl("persistent").await, Some(Ttl::Unbounded));
}

#[tokio::test]
async fn test_zero_ttl_stores_persistent_entry() {
    let cache = create_test_cache().await;

    cache.set("zero", b"value", Some(Duration::ZERO)).await;

    assert_eq!(cache.get_ttl("zero").await, Some(Ttl::Unbounded));
}

#[tokio::test]
async fn test_get_ttl_absent_key() {
    let cache = create_test_cache().await;

    assert_eq!(cache.get_ttl("absent").await, None);
}

#[tokio::test]
async fn test_get_ttl_after_expiry() {
    let cache = create_test_cache().await;

    cache
        .set("short-lived", b"value", Some(Duration::from_millis(80)))
        .await;
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(cache.get_ttl("short-lived").await, None);
}

// == Stats ==

#[tokio::test]
async fn test_stats_reflect_read_outcomes() {
    let cache = create_test_cache().await;

    cache.set("key", b"value", None).await;
    cache.get("key").await;
    cache.get("missing").await;
    cache.pop("key").await;

    let stats = cache.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.errors, 0);
    assert!((stats.hit_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
}
