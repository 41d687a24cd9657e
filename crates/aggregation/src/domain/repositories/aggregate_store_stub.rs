// crates/aggregation/src/domain/repositories/aggregate_store_stub.rs

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use shared_kernel::errors::{AppError, AppResult};

use crate::domain::models::AggregateResult;
use crate::domain::repositories::AggregateStore;
use crate::domain::value_objects::UserId;

#[derive(Default)]
pub struct AggregateStoreStub {
    pub records: Mutex<Vec<(UserId, AggregateResult)>>,
    /// Nombre d'appels à faire échouer avant de réussir
    failures_left: AtomicU32,
}

impl AggregateStoreStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(times: u32) -> Self {
        Self {
            failures_left: AtomicU32::new(times),
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<(UserId, AggregateResult)> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AggregateStore for AggregateStoreStub {
    async fn append(&self, user_id: &UserId, result: &AggregateResult) -> AppResult<()> {
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(AppError::infrastructure("Store Down"));
        }

        self.records
            .lock()
            .unwrap()
            .push((user_id.clone(), result.clone()));
        Ok(())
    }
}
