// crates/aggregation/tests/common/setup_infrastructure.rs

use aggregation::infrastructure::postgres::utils::run_postgres_migrations;
use shared_kernel::infrastructure::postgres::utils::PostgresTestContext;
use shared_kernel::infrastructure::redis::utils::RedisTestContext;

/// Postgres jetable avec le schéma du service
pub async fn setup_postgres_test_db() -> PostgresTestContext {
    let context = PostgresTestContext::builder().build().await;
    run_postgres_migrations(&context.pool())
        .await
        .expect("Failed to run migrations");
    context
}

pub async fn setup_redis_test_cache() -> RedisTestContext {
    RedisTestContext::builder().build().await
}
