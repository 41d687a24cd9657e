// crates/aggregation/tests/infrastructure/redis_cache_repository_it.rs

use shared_kernel::domain::repositories::CacheRepository;
use std::time::Duration;

#[tokio::test]
async fn test_set_get_with_ttl() {
    let redis = crate::common::setup_redis_test_cache().await;
    let cache = redis.repository();

    cache
        .set("aggregate:u1", r#"{"user":{},"products":[]}"#, Some(Duration::from_secs(3600)))
        .await
        .unwrap();

    assert_eq!(
        cache.get("aggregate:u1").await.unwrap().as_deref(),
        Some(r#"{"user":{},"products":[]}"#)
    );
    assert!(cache.exists("aggregate:u1").await.unwrap());

    let ttl = cache.ttl("aggregate:u1").await.unwrap().expect("ttl should be set");
    assert!(ttl <= Duration::from_secs(3600) && ttl > Duration::from_secs(3500));
}

#[tokio::test]
async fn test_missing_and_persistent_keys() {
    let redis = crate::common::setup_redis_test_cache().await;
    let cache = redis.repository();

    assert!(cache.get("aggregate:nobody").await.unwrap().is_none());
    assert!(cache.ttl("aggregate:nobody").await.unwrap().is_none());

    cache.set("plain", "v", None).await.unwrap();
    assert!(cache.ttl("plain").await.unwrap().is_none());

    cache.delete("plain").await.unwrap();
    assert!(!cache.exists("plain").await.unwrap());
}

#[tokio::test]
async fn test_entries_expire() {
    let redis = crate::common::setup_redis_test_cache().await;
    let cache = redis.repository();

    cache.set("short", "v", Some(Duration::from_secs(1))).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert!(cache.get("short").await.unwrap().is_none());
}
