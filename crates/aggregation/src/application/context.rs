// crates/aggregation/src/application/context.rs

use std::sync::Arc;
use shared_kernel::application::ports::{MessageConsumer, MessageProducer};
use shared_kernel::domain::repositories::CacheRepository;

use crate::application::aggregate::AggregateUseCase;
use crate::application::submit_request::SubmitRequestUseCase;
use crate::application::workers::{AggregationWorker, WorkerConfig};
use crate::domain::ports::{ProductClient, UserProfileClient};
use crate::domain::repositories::AggregateStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    pub request: String,
    pub response: String,
    /// `None` désactive les lettres mortes
    pub dead_letter: Option<String>,
}

impl Default for Topics {
    fn default() -> Self {
        Self {
            request: "api.request".to_string(),
            response: "api.response".to_string(),
            dead_letter: Some("api.request.dlq".to_string()),
        }
    }
}

/// Dépendances partagées du service, construites une seule fois au démarrage
/// puis injectées dans l'ingress et le worker.
#[derive(Clone)]
pub struct AggregationContext {
    pub cache: Arc<dyn CacheRepository>,
    pub store: Arc<dyn AggregateStore>,
    pub profiles: Arc<dyn UserProfileClient>,
    pub products: Arc<dyn ProductClient>,
    pub producer: Arc<dyn MessageProducer>,
    pub consumer: Arc<dyn MessageConsumer>,
    pub topics: Topics,
}

impl AggregationContext {
    pub fn aggregate_use_case(&self) -> AggregateUseCase {
        AggregateUseCase::new(
            self.cache.clone(),
            self.store.clone(),
            self.profiles.clone(),
            self.products.clone(),
            self.producer.clone(),
            &self.topics.response,
        )
    }

    pub fn submit_use_case(&self) -> SubmitRequestUseCase {
        SubmitRequestUseCase::new(self.producer.clone(), &self.topics.request)
    }

    /// Le topic de lettres mortes du contexte prime sur celui de `config`
    pub fn worker(&self, config: WorkerConfig) -> AggregationWorker {
        let config = WorkerConfig {
            dead_letter_topic: self.topics.dead_letter.clone(),
            ..config
        };

        AggregationWorker::new(
            self.consumer.clone(),
            self.producer.clone(),
            Arc::new(self.aggregate_use_case()),
            config,
        )
    }
}
