// crates/shared-kernel/src/infrastructure/kafka/kafka_config.rs

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct KafkaConfig {
    pub brokers: String,
    pub group_id: String,
    pub message_timeout: Duration,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            group_id: "api_aggregation_group".to_string(),
            message_timeout: Duration::from_secs(5),
        }
    }
}

impl KafkaConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(brokers) = std::env::var("KAFKA_BOOTSTRAP_SERVERS") {
            config.brokers = brokers;
        }
        if let Ok(group_id) = std::env::var("KAFKA_GROUP_ID") {
            config.group_id = group_id;
        }

        config
    }

    pub fn with_brokers(mut self, brokers: impl Into<String>) -> Self {
        self.brokers = brokers.into();
        self
    }

    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }
}
