// crates/shared-kernel/src/infrastructure/kafka/kafka_message_consumer.rs

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::{Headers, Message};
use std::time::Duration;

use crate::application::ports::MessageConsumer;
use crate::domain::messages::InboundMessage;
use crate::errors::{AppError, AppResult};
use crate::infrastructure::kafka::KafkaConfig;

pub struct KafkaMessageConsumer {
    consumer: StreamConsumer,
}

impl KafkaMessageConsumer {
    pub fn new(config: &KafkaConfig, topics: &[&str]) -> AppResult<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("enable.auto.commit", "true")
            .set("auto.commit.interval.ms", "5000")
            // Ne rate rien au démarrage
            .set("auto.offset.reset", "earliest")
            .set("session.timeout.ms", "45000")
            .set("max.poll.interval.ms", "300000")
            .create()
            .map_err(|e| AppError::internal(format!("Kafka consumer config error: {e}")))?;

        consumer.subscribe(topics)?;

        tracing::info!("📥 Kafka consumer subscribed to {:?} (group: {})", topics, config.group_id);

        Ok(Self { consumer })
    }
}

#[async_trait]
impl MessageConsumer for KafkaMessageConsumer {
    async fn poll(&self, timeout: Duration) -> AppResult<Option<InboundMessage>> {
        let message = match tokio::time::timeout(timeout, self.consumer.recv()).await {
            Err(_) => return Ok(None),
            Ok(result) => result?,
        };

        let headers = message
            .headers()
            .map(|headers| {
                headers
                    .iter()
                    .filter_map(|h| {
                        h.value
                            .map(|v| (h.key.to_string(), String::from_utf8_lossy(v).into_owned()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Some(InboundMessage {
            topic: message.topic().to_string(),
            partition: message.partition(),
            offset: message.offset(),
            key: message.key().map(|k| String::from_utf8_lossy(k).into_owned()),
            headers,
            payload: message.payload().map(<[u8]>::to_vec).unwrap_or_default(),
        }))
    }
}
