// crates/shared-kernel/src/application/ports/message_producer.rs

use crate::domain::messages::OutboundMessage;
use crate::errors::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait MessageProducer: Send + Sync {
    /// Publie un message et attend l'accusé de réception du broker.
    async fn publish(&self, message: &OutboundMessage) -> AppResult<()>;
}
