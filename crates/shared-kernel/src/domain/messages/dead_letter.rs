// crates/shared-kernel/src/domain/messages/dead_letter.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::messages::{InboundMessage, OutboundMessage};
use crate::errors::AppError;

/// Trace d'un message abandonné après épuisement des tentatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadLetter {
    pub source_topic: String,
    pub partition: i32,
    pub offset: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub payload: String,
    pub error_code: String,
    pub error: String,
    pub attempts: u32,
    pub failed_at: DateTime<Utc>,
}

impl DeadLetter {
    pub fn from_failure(message: &InboundMessage, error: &AppError, attempts: u32) -> Self {
        Self {
            source_topic: message.topic.clone(),
            partition: message.partition,
            offset: message.offset,
            key: message.key.clone(),
            payload: message.payload_lossy(),
            error_code: error.code.as_str().to_string(),
            error: error.message.clone(),
            attempts,
            failed_at: Utc::now(),
        }
    }

    pub fn into_message(self, topic: &str) -> Result<OutboundMessage, serde_json::Error> {
        let payload = serde_json::to_vec(&self)?;
        let mut message = OutboundMessage::new(topic, payload)
            .with_header("source_topic", self.source_topic.as_str())
            .with_header("error_code", self.error_code.as_str());

        if let Some(key) = self.key {
            message = message.with_key(key);
        }

        Ok(message)
    }
}
