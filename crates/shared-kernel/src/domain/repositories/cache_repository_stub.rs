// crates/shared-kernel/src/domain/repositories/cache_repository_stub.rs

use crate::domain::repositories::CacheRepository;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Cache en mémoire. L'expiration suit l'horloge tokio :
/// `tokio::time::pause()` / `advance()` permettent de simuler le TTL.
#[derive(Default)]
pub struct CacheRepositoryStub {
    storage: Mutex<HashMap<String, (String, Option<Instant>)>>,
    fail_all: AtomicBool,
    set_calls: AtomicUsize,
}

impl CacheRepositoryStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    /// Pré-remplit une entrée sans passer par le compteur d'écritures
    pub fn seed(&self, key: &str, value: &str, ttl: Option<Duration>) {
        let expires_at = ttl.map(|d| Instant::now() + d);
        self.storage
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), expires_at));
    }

    fn check(&self) -> AppResult<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(AppError::infrastructure("Cache Down"));
        }
        Ok(())
    }

    fn live_entry(&self, key: &str) -> Option<(String, Option<Instant>)> {
        let mut map = self.storage.lock().unwrap();
        match map.get(key) {
            Some((_, Some(expires_at))) if *expires_at <= Instant::now() => {
                map.remove(key);
                None
            }
            Some(entry) => Some(entry.clone()),
            None => None,
        }
    }
}

#[async_trait]
impl CacheRepository for CacheRepositoryStub {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        self.check()?;
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.seed(key, value, ttl);
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.check()?;
        Ok(self.live_entry(key).map(|(value, _)| value))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.check()?;
        self.storage.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.check()?;
        Ok(self.live_entry(key).is_some())
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        self.check()?;
        Ok(self
            .live_entry(key)
            .and_then(|(_, expires_at)| expires_at)
            .map(|at| at.saturating_duration_since(Instant::now())))
    }
}
