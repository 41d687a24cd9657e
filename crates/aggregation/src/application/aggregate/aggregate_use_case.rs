// crates/aggregation/src/application/aggregate/aggregate_use_case.rs

use std::sync::Arc;
use serde_json::Map;
use shared_kernel::application::ports::MessageProducer;
use shared_kernel::domain::messages::OutboundMessage;
use shared_kernel::domain::repositories::CacheRepository;
use shared_kernel::errors::AppResult;
use shared_kernel::infrastructure::concurrency::Singleflight;

use crate::domain::models::{AGGREGATE_CACHE_TTL, AggregateResult, AggregationRequest, aggregate_cache_key};
use crate::domain::ports::{ProductClient, UserProfileClient};
use crate::domain::repositories::AggregateStore;
use crate::domain::value_objects::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationOutcome {
    /// Valeur en cache republiée telle quelle
    CacheHit,
    /// Fan-out, persistance et mise en cache effectués par cet appel
    Aggregated,
    /// Résultat d'un vol concurrent pour le même utilisateur
    Joined,
}

pub struct AggregateUseCase {
    cache: Arc<dyn CacheRepository>,
    store: Arc<dyn AggregateStore>,
    profiles: Arc<dyn UserProfileClient>,
    products: Arc<dyn ProductClient>,
    producer: Arc<dyn MessageProducer>,
    response_topic: String,
    /// Payload et indicateur « agrégé par ce vol » (faux si trouvé en cache entre-temps)
    in_flight: Singleflight<UserId, (String, bool)>,
}

impl AggregateUseCase {
    pub fn new(
        cache: Arc<dyn CacheRepository>,
        store: Arc<dyn AggregateStore>,
        profiles: Arc<dyn UserProfileClient>,
        products: Arc<dyn ProductClient>,
        producer: Arc<dyn MessageProducer>,
        response_topic: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            store,
            profiles,
            products,
            producer,
            response_topic: response_topic.into(),
            in_flight: Singleflight::new(),
        }
    }

    pub async fn execute(&self, request: &AggregationRequest) -> AppResult<AggregationOutcome> {
        let key = aggregate_cache_key(&request.user_id);

        // 1. Cache-aside : un hit court-circuite tout, y compris les product_ids de la demande
        if let Some(cached) = self.cache.get(&key).await? {
            tracing::debug!("Cache hit for user_id: {}", request.user_id);
            self.publish(request, cached).await?;
            return Ok(AggregationOutcome::CacheHit);
        }

        tracing::debug!("Cache miss for user_id: {}, fetching from services", request.user_id);

        // 2. Un seul fan-out par utilisateur à la fois
        let (result, leader) = self
            .in_flight
            .execute(request.user_id.clone(), || self.aggregate_and_store(request, &key))
            .await;
        let (payload, aggregated) = result?;

        self.publish(request, payload).await?;

        Ok(match (leader, aggregated) {
            (false, _) => AggregationOutcome::Joined,
            (true, true) => AggregationOutcome::Aggregated,
            (true, false) => AggregationOutcome::CacheHit,
        })
    }

    /// Lectures séquentielles : profil puis chaque produit dans l'ordre demandé.
    /// Les absences ne sont jamais des erreurs.
    pub async fn fan_out(&self, request: &AggregationRequest) -> AggregateResult {
        let user = match &request.email {
            Some(email) => self
                .profiles
                .fetch_profile(email, &request.token)
                .await
                .unwrap_or_default(),
            None => {
                tracing::debug!("No email for user_id: {}, profile left empty", request.user_id);
                Map::new()
            }
        };

        let mut products = Vec::with_capacity(request.product_ids.len());
        for product_id in &request.product_ids {
            match self.products.fetch_product(product_id, &request.token).await {
                Some(product) => products.push(product),
                None => tracing::warn!("Product {} unavailable, omitted from aggregate", product_id),
            }
        }

        AggregateResult::new(user, products)
    }

    async fn aggregate_and_store(&self, request: &AggregationRequest, key: &str) -> AppResult<(String, bool)> {
        // Un vol précédent a pu se terminer entre la première lecture et l'entrée dans le singleflight
        if let Some(cached) = self.cache.get(key).await? {
            tracing::debug!("Aggregate for user_id {} cached by a previous flight", request.user_id);
            return Ok((cached, false));
        }

        let result = self.fan_out(request).await;
        let payload = result.to_json()?;

        // Pas d'atomicité entre les deux écritures : un échec du cache laisse l'enregistrement en base
        self.store.append(&request.user_id, &result).await?;
        tracing::debug!("Aggregate persisted for user_id: {}", request.user_id);

        self.cache.set(key, &payload, Some(AGGREGATE_CACHE_TTL)).await?;

        Ok((payload, true))
    }

    async fn publish(&self, request: &AggregationRequest, payload: String) -> AppResult<()> {
        let message = OutboundMessage::new(&self.response_topic, payload)
            .with_key(request.user_id.as_str())
            .with_header("request_id", request.request_id.to_string());

        self.producer.publish(&message).await?;

        tracing::info!(
            "📤 Aggregate for user_id {} sent to {} (request_id: {})",
            request.user_id,
            self.response_topic,
            request.request_id
        );
        Ok(())
    }
}
