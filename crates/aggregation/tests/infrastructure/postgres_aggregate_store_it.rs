// crates/aggregation/tests/infrastructure/postgres_aggregate_store_it.rs

use aggregation::domain::models::AggregateResult;
use aggregation::domain::repositories::AggregateStore;
use aggregation::domain::value_objects::UserId;
use aggregation::infrastructure::postgres::repositories::PostgresAggregateStore;
use aggregation::infrastructure::postgres::utils::run_postgres_migrations;
use serde_json::{Map, Value, json};
use sqlx::Row;

fn alice_result() -> AggregateResult {
    let mut user = Map::new();
    user.insert("name".into(), json!("Alice"));
    AggregateResult::new(user, vec![json!({"id": "p1", "price": 10})])
}

#[tokio::test]
async fn test_every_append_creates_a_new_row() {
    let db = crate::common::setup_postgres_test_db().await;
    let store = PostgresAggregateStore::new(db.pool());
    let user_id = UserId::try_new("u1").unwrap();

    store.append(&user_id, &alice_result()).await.expect("First append failed");
    store.append(&user_id, &alice_result()).await.expect("Second append failed");

    let rows = sqlx::query("SELECT id, user_id, payload FROM aggregated_data ORDER BY id")
        .fetch_all(&db.pool())
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    let first_id: uuid::Uuid = rows[0].get("id");
    let second_id: uuid::Uuid = rows[1].get("id");
    assert_ne!(first_id, second_id);

    let user: String = rows[0].get("user_id");
    assert_eq!(user, "u1");

    let payload: Value = rows[0].get("payload");
    assert_eq!(
        payload,
        json!({"user": {"name": "Alice"}, "products": [{"id": "p1", "price": 10}]})
    );
}

#[tokio::test]
async fn test_empty_aggregate_is_stored_as_is() {
    let db = crate::common::setup_postgres_test_db().await;
    let store = PostgresAggregateStore::new(db.pool());

    store
        .append(&UserId::try_new("u2").unwrap(), &AggregateResult::empty())
        .await
        .unwrap();

    let payload: Value = sqlx::query_scalar("SELECT payload FROM aggregated_data WHERE user_id = $1")
        .bind("u2")
        .fetch_one(&db.pool())
        .await
        .unwrap();
    assert_eq!(payload, json!({"user": {}, "products": []}));
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let db = crate::common::setup_postgres_test_db().await;

    run_postgres_migrations(&db.pool()).await.expect("Second run should be a no-op");
}

#[tokio::test]
async fn test_closed_pool_is_a_retryable_failure() {
    let db = crate::common::setup_postgres_test_db().await;
    let pool = db.pool();
    let store = PostgresAggregateStore::new(pool.clone());
    pool.close().await;

    let err = store
        .append(&UserId::try_new("u1").unwrap(), &alice_result())
        .await
        .unwrap_err();

    assert!(err.is_retryable());
}
