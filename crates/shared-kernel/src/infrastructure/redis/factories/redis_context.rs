// crates/shared-kernel/src/infrastructure/redis/factories/redis_context.rs

use std::sync::Arc;
use crate::errors::{AppError, AppResult};
use crate::infrastructure::redis::repositories::RedisCacheRepository;
use crate::infrastructure::redis::factories::{RedisConfig, RedisContextBuilder};

pub struct RedisContext {
    repository: Arc<RedisCacheRepository>,
    url: String,
    max_clients: usize,
}

impl RedisContext {
    /// Builder initialisé depuis l'environnement (REDIS_URL, REDIS_MAX_CLIENTS)
    pub fn builder() -> AppResult<RedisContextBuilder> {
        RedisContextBuilder::new()
    }

    pub fn builder_raw() -> RedisContextBuilder {
        RedisContextBuilder::default()
    }

    pub fn repository(&self) -> Arc<RedisCacheRepository> {
        self.repository.clone()
    }

    pub fn url(&self) -> String {
        self.url.clone()
    }

    pub fn config(&self) -> RedisConfig {
        RedisConfig {
            max_clients: self.max_clients,
        }
    }

    pub async fn close(&self) {
        self.repository.quit().await;
    }

    pub(crate) async fn restore(builder: RedisContextBuilder) -> AppResult<Self> {
        let repository = RedisCacheRepository::connect(&builder.url, builder.max_clients).await
            .map_err(|e| AppError::internal(
                format!("Failed to connect to Redis at {}: {}", builder.url, e.message)
            ))?;

        Ok(Self {
            repository: Arc::new(repository),
            url: builder.url,
            max_clients: builder.max_clients,
        })
    }
}
