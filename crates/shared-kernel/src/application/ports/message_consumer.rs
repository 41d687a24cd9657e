// crates/shared-kernel/src/application/ports/message_consumer.rs

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::messages::InboundMessage;
use crate::errors::AppResult;

#[async_trait]
pub trait MessageConsumer: Send + Sync {
    /// Attend le prochain message au plus `timeout`.
    /// `Ok(None)` : rien n'est arrivé dans la fenêtre.
    /// `Err(_)` : erreur de livraison côté broker, l'appelant décide de continuer.
    async fn poll(&self, timeout: Duration) -> AppResult<Option<InboundMessage>>;
}
