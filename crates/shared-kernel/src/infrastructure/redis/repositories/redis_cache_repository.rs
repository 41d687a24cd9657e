// crates/shared-kernel/src/infrastructure/redis/repositories/redis_cache_repository.rs

use async_trait::async_trait;
use fred::clients::Pool;
use fred::prelude::*;
use fred::types::{Builder, Expiration};
use std::time::Duration;

use crate::domain::repositories::CacheRepository;
use crate::errors::{AppError, AppResult};

pub struct RedisCacheRepository {
    pool: Pool,
}

impl RedisCacheRepository {
    pub async fn connect(redis_url: &str, max_clients: usize) -> AppResult<Self> {
        let config = Config::from_url(redis_url)
            .map_err(|e| AppError::internal(e.to_string()))?;

        let pool = Builder::from_config(config)
            .with_connection_config(|cfg| {
                cfg.connection_timeout = Duration::from_secs(5);
                cfg.internal_command_timeout = Duration::from_secs(5);
                cfg.max_command_attempts = 5;
            })
            .set_policy(ReconnectPolicy::new_exponential(0, 100, 1000, 2))
            .build_pool(max_clients.max(1))?;

        pool.init().await?;

        Ok(Self { pool })
    }

    pub async fn quit(&self) {
        if let Err(e) = self.pool.quit().await {
            tracing::warn!("Redis pool did not close cleanly: {}", e);
        }
    }

    fn map_expiration(ttl: Option<Duration>) -> Option<Expiration> {
        ttl.map(|d| {
            if d < Duration::from_secs(1) {
                Expiration::PX(d.as_millis() as i64)
            } else {
                Expiration::EX(d.as_secs() as i64)
            }
        })
    }
}

#[async_trait]
impl CacheRepository for RedisCacheRepository {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        self.pool
            .set::<(), _, _>(key, value, Self::map_expiration(ttl), None, false)
            .await?;

        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let result: Option<String> = self.pool.get(key).await?;

        Ok(result)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.pool.del::<i64, _>(key).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let count: i64 = self.pool.exists(key).await?;

        Ok(count > 0)
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        // -2 : clé absente, -1 : pas d'expiration
        let seconds: i64 = self.pool.ttl(key).await?;

        Ok((seconds >= 0).then(|| Duration::from_secs(seconds as u64)))
    }
}
