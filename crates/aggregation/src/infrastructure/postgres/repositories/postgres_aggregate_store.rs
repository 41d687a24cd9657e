// crates/aggregation/src/infrastructure/postgres/repositories/postgres_aggregate_store.rs

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;
use shared_kernel::errors::AppResult;
use shared_kernel::infrastructure::postgres::mappers::SqlxErrorExt;

use crate::domain::models::AggregateResult;
use crate::domain::repositories::AggregateStore;
use crate::domain::value_objects::UserId;

pub struct PostgresAggregateStore {
    pool: PgPool,
}

impl PostgresAggregateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AggregateStore for PostgresAggregateStore {
    async fn append(&self, user_id: &UserId, result: &AggregateResult) -> AppResult<()> {
        // Toujours un INSERT : chaque miss produit une nouvelle ligne
        sqlx::query(
            r#"
            INSERT INTO aggregated_data (id, user_id, payload)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(user_id.as_str())
        .bind(Json(result))
        .execute(&self.pool)
        .await
        .map_infra("Aggregate append failed")?;

        Ok(())
    }
}
