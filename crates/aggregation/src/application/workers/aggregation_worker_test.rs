// crates/aggregation/src/application/workers/aggregation_worker_test.rs

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use shared_kernel::application::ports::{MessageBrokerStub, MessageProducer};
use shared_kernel::domain::messages::{DeadLetter, InboundMessage, OutboundMessage};
use shared_kernel::domain::repositories::CacheRepositoryStub;
use shared_kernel::errors::{AppError, AppResult};
use shared_kernel::infrastructure::RetryConfig;

use crate::application::aggregate::{AggregateUseCase, AggregationOutcome};
use crate::application::workers::{AggregationWorker, MessageOutcome, WorkerConfig};
use crate::domain::ports::{ProductClientStub, UserProfileClientStub};
use crate::domain::repositories::AggregateStoreStub;

const DLQ: &str = "api.request.dlq";

struct Fixture {
    broker: Arc<MessageBrokerStub>,
    store: Arc<AggregateStoreStub>,
    products: Arc<ProductClientStub>,
}

impl Fixture {
    fn new(products: ProductClientStub, store: AggregateStoreStub) -> Self {
        Self {
            broker: Arc::new(MessageBrokerStub::new()),
            store: Arc::new(store),
            products: Arc::new(products),
        }
    }

    fn alice() -> Self {
        Self::new(
            ProductClientStub::default().with_product("p1", json!({"id": "p1", "price": 10})),
            AggregateStoreStub::new(),
        )
    }

    fn worker(&self, config: WorkerConfig) -> AggregationWorker {
        let use_case = AggregateUseCase::new(
            Arc::new(CacheRepositoryStub::new()),
            self.store.clone(),
            Arc::new(
                UserProfileClientStub::default().with_profile("alice@x.io", json!({"name": "Alice"})),
            ),
            self.products.clone(),
            self.broker.clone(),
            "api.response",
        );

        AggregationWorker::new(self.broker.clone(), self.broker.clone(), Arc::new(use_case), config)
    }

    fn responses(&self) -> usize {
        self.broker.published_on("api.response").len()
    }
}

/// Refuse les premières réponses et note le request_id de chaque tentative
struct FlakyResponses {
    inner: Arc<MessageBrokerStub>,
    failures_left: AtomicU32,
    attempted_ids: Mutex<Vec<String>>,
}

#[async_trait]
impl MessageProducer for FlakyResponses {
    async fn publish(&self, message: &OutboundMessage) -> AppResult<()> {
        if message.topic == "api.response" {
            let id = message.header("request_id").unwrap_or_default().to_string();
            self.attempted_ids.lock().unwrap().push(id);

            let fail = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if fail {
                return Err(AppError::unavailable("broker busy"));
            }
        }
        self.inner.publish(message).await
    }
}

fn config() -> WorkerConfig {
    WorkerConfig {
        poll_timeout: Duration::from_millis(20),
        error_backoff: Duration::from_millis(5),
        retry: RetryConfig::default().with_initial_backoff(Duration::from_millis(1)),
        ..Default::default()
    }
}

fn alice_message() -> InboundMessage {
    let payload = json!({
        "user_id": "u1",
        "product_ids": ["p1"],
        "token": "tok",
        "email": "alice@x.io"
    });
    InboundMessage::new("api.request", payload.to_string()).with_key("u1")
}

async fn wait_for(condition: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test]
async fn test_valid_request_is_aggregated_and_answered() {
    let fx = Fixture::alice();

    let outcome = fx.worker(config()).handle_message(alice_message()).await;

    assert_eq!(outcome, MessageOutcome::Processed(AggregationOutcome::Aggregated));
    let response = &fx.broker.published_on("api.response")[0];
    assert_eq!(
        response.payload_str(),
        Some(r#"{"user":{"name":"Alice"},"products":[{"id":"p1","price":10}]}"#)
    );
    assert!(response.header("request_id").is_some());
}

#[tokio::test]
async fn test_end_to_end_scenario_with_one_missing_product() {
    let fx = Fixture::alice();
    let payload = json!({
        "user_id": "u1",
        "product_ids": ["p1", "p2"],
        "token": "tok",
        "email": "alice@x.io"
    });

    let outcome = fx
        .worker(config())
        .handle_message(InboundMessage::new("api.request", payload.to_string()))
        .await;

    let expected = r#"{"user":{"name":"Alice"},"products":[{"id":"p1","price":10}]}"#;
    assert_eq!(outcome, MessageOutcome::Processed(AggregationOutcome::Aggregated));
    assert_eq!(fx.products.requested_ids(), vec!["p1", "p2"]);
    assert_eq!(fx.broker.published_on("api.response")[0].payload_str(), Some(expected));

    let records = fx.store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].1.to_json().unwrap(), expected);
}

#[tokio::test]
async fn test_malformed_payload_is_dead_lettered_without_retry() {
    let fx = Fixture::alice();
    let message = InboundMessage::new("api.request", b"{not json".to_vec()).with_position(0, 7);

    let outcome = fx.worker(config()).handle_message(message).await;

    assert_eq!(outcome, MessageOutcome::DeadLettered { attempts: 1 });
    assert_eq!(fx.responses(), 0);

    let dead = fx.broker.published_on(DLQ);
    assert_eq!(dead.len(), 1);
    let letter: DeadLetter = serde_json::from_slice(&dead[0].payload).unwrap();
    assert_eq!(letter.error_code, "VALIDATION_FAILED");
    assert_eq!(letter.payload, "{not json");
    assert_eq!(letter.offset, 7);
}

#[tokio::test]
async fn test_blank_user_id_is_a_validation_failure() {
    let fx = Fixture::alice();
    let payload = json!({"user_id": " ", "product_ids": [], "token": "tok"}).to_string();

    let outcome = fx
        .worker(config())
        .handle_message(InboundMessage::new("api.request", payload))
        .await;

    assert_eq!(outcome, MessageOutcome::DeadLettered { attempts: 1 });
    assert_eq!(fx.products.call_count(), 0);
}

#[tokio::test]
async fn test_transient_failure_is_retried_until_success() {
    let fx = Fixture::new(
        ProductClientStub::default().with_product("p1", json!({"id": "p1"})),
        AggregateStoreStub::failing(2),
    );

    let outcome = fx.worker(config()).handle_message(alice_message()).await;

    assert_eq!(outcome, MessageOutcome::Processed(AggregationOutcome::Aggregated));
    assert_eq!(fx.store.records().len(), 1);
    assert_eq!(fx.products.call_count(), 3);
    assert!(fx.broker.published_on(DLQ).is_empty());
}

#[tokio::test]
async fn test_exhausted_retries_go_to_dead_letter_topic() {
    let fx = Fixture::new(
        ProductClientStub::default().with_product("p1", json!({"id": "p1"})),
        AggregateStoreStub::failing(10),
    );

    let outcome = fx.worker(config()).handle_message(alice_message()).await;

    assert_eq!(outcome, MessageOutcome::DeadLettered { attempts: 3 });
    let dead = fx.broker.published_on(DLQ);
    assert_eq!(dead[0].key.as_deref(), Some("u1"));
    assert_eq!(dead[0].header("error_code"), Some("INFRASTRUCTURE_FAILURE"));
    assert_eq!(fx.responses(), 0);
}

#[tokio::test]
async fn test_disabled_dead_letter_topic_drops_the_message() {
    let fx = Fixture::alice();
    let config = WorkerConfig {
        dead_letter_topic: None,
        ..config()
    };

    let outcome = fx
        .worker(config)
        .handle_message(InboundMessage::new("api.request", b"[]".to_vec()))
        .await;

    assert_eq!(outcome, MessageOutcome::Dropped { attempts: 1 });
    assert!(fx.broker.published().is_empty());
}

#[tokio::test]
async fn test_dead_letter_publish_failure_drops_the_message() {
    let fx = Fixture::alice();
    fx.broker.fail_topic(DLQ);

    let outcome = fx
        .worker(config())
        .handle_message(InboundMessage::new("api.request", b"[]".to_vec()))
        .await;

    assert_eq!(outcome, MessageOutcome::Dropped { attempts: 1 });
}

#[tokio::test]
async fn test_loop_survives_bad_messages_and_delivery_errors() {
    let fx = Fixture::alice();
    fx.broker.push(InboundMessage::new("api.request", b"garbage".to_vec()));
    fx.broker.push_delivery_error(AppError::unavailable("Broker transport error"));
    fx.broker.push(alice_message());

    let handle = fx.worker(config()).spawn(CancellationToken::new());

    wait_for(|| fx.responses() == 1).await;
    assert_eq!(fx.broker.published_on(DLQ).len(), 1);
    assert!(!handle.is_finished());

    handle.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_stops_an_idle_worker_promptly() {
    let fx = Fixture::alice();
    let handle = fx.worker(config()).spawn(CancellationToken::new());

    tokio::time::timeout(Duration::from_secs(1), handle.shutdown())
        .await
        .expect("worker did not stop");
}

#[tokio::test]
async fn test_parent_token_cancellation_stops_the_worker() {
    let fx = Fixture::alice();
    let parent = CancellationToken::new();
    let handle = fx.worker(config()).spawn(parent.child_token());

    parent.cancel();

    wait_for(|| handle.is_finished()).await;
}

#[tokio::test]
async fn test_shutdown_finishes_the_message_in_progress() {
    let fx = Fixture::new(
        ProductClientStub::default()
            .with_product("p1", json!({"id": "p1"}))
            .with_delay(Duration::from_millis(100)),
        AggregateStoreStub::new(),
    );
    fx.broker.push(alice_message());

    let handle = fx.worker(config()).spawn(CancellationToken::new());
    wait_for(|| fx.products.call_count() == 1).await;

    handle.shutdown().await;

    assert_eq!(fx.responses(), 1);
    assert_eq!(fx.store.records().len(), 1);
}

#[tokio::test]
async fn test_sequential_worker_answers_second_request_from_cache() {
    let fx = Fixture::alice();
    fx.broker.push(alice_message());
    fx.broker.push(alice_message());

    let handle = fx.worker(config()).spawn(CancellationToken::new());
    wait_for(|| fx.responses() == 2).await;
    handle.shutdown().await;

    assert_eq!(fx.products.call_count(), 1);
    assert_eq!(fx.store.records().len(), 1);
}

#[tokio::test]
async fn test_concurrent_worker_collapses_misses_for_same_user() {
    let fx = Fixture::new(
        ProductClientStub::default()
            .with_product("p1", json!({"id": "p1"}))
            .with_delay(Duration::from_millis(100)),
        AggregateStoreStub::new(),
    );
    fx.broker.push(alice_message());
    fx.broker.push(alice_message());

    let config = WorkerConfig {
        max_in_flight: 4,
        ..config()
    };
    let handle = fx.worker(config).spawn(CancellationToken::new());
    wait_for(|| fx.responses() == 2).await;
    handle.shutdown().await;

    assert_eq!(fx.products.call_count(), 1);
    assert_eq!(fx.store.records().len(), 1);
}

#[tokio::test]
async fn test_retries_keep_the_generated_request_id() {
    let broker = Arc::new(MessageBrokerStub::new());
    let producer = Arc::new(FlakyResponses {
        inner: broker.clone(),
        failures_left: AtomicU32::new(2),
        attempted_ids: Mutex::new(Vec::new()),
    });
    let use_case = AggregateUseCase::new(
        Arc::new(CacheRepositoryStub::new()),
        Arc::new(AggregateStoreStub::new()),
        Arc::new(UserProfileClientStub::default()),
        Arc::new(ProductClientStub::default().with_product("p1", json!({"id": "p1"}))),
        producer.clone(),
        "api.response",
    );
    let worker = AggregationWorker::new(broker.clone(), producer.clone(), Arc::new(use_case), config());

    // Pas de request_id dans l'événement : il est généré au décodage
    let outcome = worker.handle_message(alice_message()).await;

    assert_eq!(outcome, MessageOutcome::Processed(AggregationOutcome::CacheHit));
    let ids = producer.attempted_ids.lock().unwrap().clone();
    assert_eq!(ids.len(), 3);
    assert!(!ids[0].is_empty());
    assert!(ids.iter().all(|id| id == &ids[0]));
    assert_eq!(broker.published_on("api.response")[0].header("request_id"), Some(ids[0].as_str()));
}
