// crates/aggregation/src/domain/repositories/aggregate_store.rs

use async_trait::async_trait;
use shared_kernel::errors::AppResult;

use crate::domain::models::AggregateResult;
use crate::domain::value_objects::UserId;

/// Puits append-only des agrégats calculés. Pas de dédoublonnage, pas d'upsert.
#[async_trait]
pub trait AggregateStore: Send + Sync {
    async fn append(&self, user_id: &UserId, result: &AggregateResult) -> AppResult<()>;
}
