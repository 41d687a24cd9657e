// crates/shared-kernel/src/domain/repositories/cache_repository.rs

use crate::errors::AppResult;
use async_trait::async_trait;
use std::time::Duration;

/// Stockage clé/valeur avec expiration par clé.
/// Les valeurs sont du JSON déjà sérialisé : le cache ne connaît pas les types métier.
#[async_trait]
pub trait CacheRepository: Send + Sync {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()>;
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn delete(&self, key: &str) -> AppResult<()>;
    async fn exists(&self, key: &str) -> AppResult<bool>;
    /// Durée de vie restante. `None` si la clé est absente ou sans expiration.
    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>>;
}
