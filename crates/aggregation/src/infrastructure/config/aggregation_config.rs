// crates/aggregation/src/infrastructure/config/aggregation_config.rs

use std::time::Duration;
use shared_kernel::errors::{AppError, AppResult};
use shared_kernel::infrastructure::RetryConfig;
use shared_kernel::infrastructure::env::{env_or, env_string_or};

use crate::application::Topics;
use crate::application::workers::WorkerConfig;
use crate::infrastructure::api::http::JwtConfig;
use crate::infrastructure::http::DownstreamConfig;

/// Configuration du service hors connexions (Kafka, Redis et Postgres ont leurs propres contextes)
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    pub topics: Topics,
    pub worker: WorkerConfig,
    pub downstream: DownstreamConfig,
    pub jwt: JwtConfig,
    pub port: u16,
}

impl AggregationConfig {
    pub fn from_env() -> AppResult<Self> {
        let topics = topics_from_env();

        let max_in_flight: usize = env_or("WORKER_MAX_IN_FLIGHT", 1)?;
        if max_in_flight == 0 {
            return Err(AppError::internal("Invalid WORKER_MAX_IN_FLIGHT: must be at least 1"));
        }

        let worker = WorkerConfig {
            poll_timeout: Duration::from_millis(env_or("WORKER_POLL_TIMEOUT_MS", 1000u64)?),
            error_backoff: Duration::from_millis(env_or("WORKER_ERROR_BACKOFF_MS", 100u64)?),
            retry: RetryConfig::default().with_max_attempts(env_or("WORKER_MAX_ATTEMPTS", 3u32)?),
            dead_letter_topic: topics.dead_letter.clone(),
            max_in_flight,
        };

        Ok(Self {
            topics,
            worker,
            downstream: DownstreamConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            port: env_or("PORT", 8080u16)?,
        })
    }
}

fn topics_from_env() -> Topics {
    let defaults = Topics::default();

    // Présente mais vide : lettres mortes désactivées
    let dead_letter = match std::env::var("AGGREGATION_DLQ_TOPIC") {
        Ok(topic) if topic.trim().is_empty() => None,
        Ok(topic) => Some(topic),
        Err(_) => defaults.dead_letter.clone(),
    };

    Topics {
        request: env_string_or("AGGREGATION_REQUEST_TOPIC", &defaults.request),
        response: env_string_or("AGGREGATION_RESPONSE_TOPIC", &defaults.response),
        dead_letter,
    }
}
