// crates/shared-kernel/src/infrastructure/retry.rs

use rand::Rng;
use std::time::Duration;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Nombre total de tentatives (la première incluse). 1 = pas de retry.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
        }
    }
}

impl RetryConfig {
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    /// Backoff exponentiel (2^attempt * base) plafonné, sans jitter
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Échec définitif : la dernière erreur et le nombre de tentatives consommées.
#[derive(Debug, Clone)]
pub struct RetryFailure {
    pub error: AppError,
    pub attempts: u32,
}

/// Exécute une action avec une stratégie de retry (Exponential Backoff + Jitter).
/// Seules les erreurs `is_retryable()` déclenchent un nouvel essai.
pub async fn with_retry<F, Fut, T>(config: &RetryConfig, mut action: F) -> Result<T, RetryFailure>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = AppResult<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match action(attempt).await {
            Ok(res) => return Ok(res),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                let base_backoff = config.backoff_for(attempt - 1);

                // Jitter entre 0 et 25% de la base pour désynchroniser les consommateurs
                let jitter_cap = (base_backoff.as_millis() as u64) / 4 + 1;
                let jitter = rand::rng().random_range(0..jitter_cap);
                let backoff = base_backoff + Duration::from_millis(jitter);

                tracing::warn!(
                    "🔄 Retryable failure (attempt {}/{}): {}, retrying in {:?}...",
                    attempt,
                    max_attempts,
                    e,
                    backoff
                );

                tokio::time::sleep(backoff).await;
            }
            Err(error) => return Err(RetryFailure { error, attempts: attempt }),
        }
    }
}
