// crates/aggregation/tests/infrastructure/aggregation_pipeline_it.rs

use aggregation::application::{AggregationContext, Topics};
use aggregation::application::workers::WorkerConfig;
use aggregation::infrastructure::http::{DownstreamConfig, ProductHttpClient, UserProfileHttpClient};
use aggregation::infrastructure::postgres::repositories::PostgresAggregateStore;
use serde_json::json;
use shared_kernel::application::ports::MessageBrokerStub;
use shared_kernel::domain::messages::InboundMessage;
use shared_kernel::domain::repositories::CacheRepository;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const ALICE_AGGREGATE: &str = r#"{"user":{"name":"Alice"},"products":[{"id":"p1","price":10}]}"#;

fn alice_request() -> InboundMessage {
    let payload = json!({
        "user_id": "u1",
        "product_ids": ["p1", "p2"],
        "token": "tok",
        "email": "alice@x.io"
    });
    InboundMessage::new("api.request", payload.to_string()).with_key("u1")
}

async fn wait_for(condition: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test]
async fn test_request_is_aggregated_persisted_cached_and_answered() {
    let db = crate::common::setup_postgres_test_db().await;
    let redis = crate::common::setup_redis_test_cache().await;
    let services = crate::common::setup_downstream_services().await;

    let http = DownstreamConfig::default().build_client().unwrap();
    let broker = Arc::new(MessageBrokerStub::new());
    let context = AggregationContext {
        cache: redis.repository(),
        store: Arc::new(PostgresAggregateStore::new(db.pool())),
        profiles: Arc::new(UserProfileHttpClient::new(&services.base_url, http.clone()).unwrap()),
        products: Arc::new(ProductHttpClient::new(&services.base_url, http).unwrap()),
        producer: broker.clone(),
        consumer: broker.clone(),
        topics: Topics::default(),
    };

    let config = WorkerConfig {
        poll_timeout: Duration::from_millis(50),
        ..Default::default()
    };
    let worker = context.worker(config).spawn(CancellationToken::new());

    // 1. Miss : profil + 2 produits (dont un introuvable)
    broker.push(alice_request());
    wait_for(|| broker.published_on("api.response").len() == 1).await;
    assert_eq!(services.hits(), 3);

    // 2. Hit : aucun appel en aval, aucune nouvelle ligne
    broker.push(alice_request());
    wait_for(|| broker.published_on("api.response").len() == 2).await;
    assert_eq!(services.hits(), 3);

    worker.shutdown().await;

    let responses = broker.published_on("api.response");
    assert!(responses.iter().all(|m| m.payload_str() == Some(ALICE_AGGREGATE)));
    assert!(responses.iter().all(|m| m.key.as_deref() == Some("u1")));

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM aggregated_data WHERE user_id = 'u1'")
        .fetch_one(&db.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let cache = redis.repository();
    assert_eq!(cache.get("aggregate:u1").await.unwrap().as_deref(), Some(ALICE_AGGREGATE));
    let ttl = cache.ttl("aggregate:u1").await.unwrap().unwrap();
    assert!(ttl > Duration::from_secs(3500));

    assert!(broker.published_on("api.request.dlq").is_empty());
}
