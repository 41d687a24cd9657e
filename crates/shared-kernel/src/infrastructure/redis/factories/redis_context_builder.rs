// crates/shared-kernel/src/infrastructure/redis/factories/redis_context_builder.rs

use crate::errors::AppResult;
use crate::infrastructure::env::{env_or, env_required};
use crate::infrastructure::redis::factories::RedisContext;

pub struct RedisContextBuilder {
    pub(crate) url: String,
    pub(crate) max_clients: usize,
}

impl Default for RedisContextBuilder {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_clients: 16,
        }
    }
}

impl RedisContextBuilder {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            url: env_required("REDIS_URL")?,
            max_clients: env_or("REDIS_MAX_CLIENTS", 16)?,
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_max_clients(mut self, max: usize) -> Self {
        self.max_clients = max;
        self
    }

    pub async fn build(self) -> AppResult<RedisContext> {
        RedisContext::restore(self).await
    }
}
