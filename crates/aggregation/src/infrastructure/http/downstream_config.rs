// crates/aggregation/src/infrastructure/http/downstream_config.rs

use std::time::Duration;
use shared_kernel::errors::{AppError, AppResult};
use shared_kernel::infrastructure::env::{env_or, env_string_or};

#[derive(Debug, Clone)]
pub struct DownstreamConfig {
    pub user_service_url: String,
    pub product_service_url: String,
    /// Délai global par requête ; un dépassement vaut une absence
    pub timeout: Duration,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            user_service_url: "http://user_service:8000".to_string(),
            product_service_url: "http://product_service:8001".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl DownstreamConfig {
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        Ok(Self {
            user_service_url: env_string_or("USER_SERVICE_URL", &defaults.user_service_url),
            product_service_url: env_string_or("PRODUCT_SERVICE_URL", &defaults.product_service_url),
            timeout: Duration::from_millis(env_or("DOWNSTREAM_TIMEOUT_MS", 5000u64)?),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Client partagé par les deux adaptateurs (pool de connexions commun)
    pub fn build_client(&self) -> AppResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| AppError::internal(format!("HTTP client configuration failed: {e}")))
    }
}
