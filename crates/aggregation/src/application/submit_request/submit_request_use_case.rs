// crates/aggregation/src/application/submit_request/submit_request_use_case.rs

use std::sync::Arc;
use shared_kernel::application::ports::MessageProducer;
use shared_kernel::domain::messages::OutboundMessage;
use shared_kernel::errors::AppResult;

use crate::application::submit_request::SubmitRequestCommand;
use crate::domain::models::AggregationRequest;
use crate::domain::value_objects::{ProductId, RequestId, UserId};

pub struct SubmitRequestUseCase {
    producer: Arc<dyn MessageProducer>,
    request_topic: String,
}

impl SubmitRequestUseCase {
    pub fn new(producer: Arc<dyn MessageProducer>, request_topic: impl Into<String>) -> Self {
        Self {
            producer,
            request_topic: request_topic.into(),
        }
    }

    /// Publie la demande et rend son identifiant de corrélation.
    /// Aucune attente du résultat : l'agrégat arrive plus tard sur le topic de réponse.
    pub async fn execute(&self, command: SubmitRequestCommand) -> AppResult<RequestId> {
        let user_id = UserId::try_new(command.user_id)?;
        let product_ids = command.product_ids.into_iter().map(ProductId::new).collect();

        let request = AggregationRequest::new(user_id, product_ids, command.token, command.email);

        let message = OutboundMessage::new(&self.request_topic, request.to_payload()?)
            .with_key(request.user_id.as_str())
            .with_header("request_id", request.request_id.to_string());

        self.producer.publish(&message).await?;

        tracing::info!(
            "📥 Aggregation request {} queued for user_id {} ({} products)",
            request.request_id,
            request.user_id,
            request.product_ids.len()
        );

        Ok(request.request_id)
    }
}
