// crates/shared-kernel/src/infrastructure/kafka/kafka_message_producer.rs

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord};

use crate::application::ports::MessageProducer;
use crate::domain::messages::OutboundMessage;
use crate::errors::{AppError, AppResult};
use crate::infrastructure::kafka::KafkaConfig;

pub struct KafkaMessageProducer {
    producer: FutureProducer,
    config: KafkaConfig,
}

impl KafkaMessageProducer {
    pub fn new(config: &KafkaConfig) -> AppResult<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", config.message_timeout.as_millis().to_string())
            .set("acks", "all")
            .set("queue.buffering.max.ms", "5")
            .create()
            .map_err(|e| AppError::internal(format!("Kafka config error: {e}")))?;

        Ok(Self {
            producer,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl MessageProducer for KafkaMessageProducer {
    async fn publish(&self, message: &OutboundMessage) -> AppResult<()> {
        let headers = message
            .headers
            .iter()
            .fold(OwnedHeaders::new(), |acc, (key, value)| {
                acc.insert(Header {
                    key: key.as_str(),
                    value: Some(value.as_str()),
                })
            });

        let mut record = FutureRecord::<str, [u8]>::to(&message.topic)
            .payload(message.payload.as_slice())
            .headers(headers);

        if let Some(key) = message.key.as_deref() {
            record = record.key(key);
        }

        self.producer
            .send(record, self.config.message_timeout)
            .await
            .map_err(|(e, _)| AppError::from(e))?;

        tracing::debug!("📤 Published {} bytes to {}", message.payload.len(), message.topic);

        Ok(())
    }
}
