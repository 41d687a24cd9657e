// crates/aggregation/src/infrastructure/bootstrap/service.rs

use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use shared_kernel::errors::{AppError, AppResult};
use shared_kernel::infrastructure::bootstrap::{init_tracing, shutdown_signal};
use shared_kernel::infrastructure::kafka::{KafkaConfig, KafkaMessageConsumer, KafkaMessageProducer};
use shared_kernel::infrastructure::postgres::factories::PostgresContext;
use shared_kernel::infrastructure::redis::factories::RedisContext;

use crate::application::AggregationContext;
use crate::infrastructure::api::http::{ApiState, JwtVerifier, router};
use crate::infrastructure::config::AggregationConfig;
use crate::infrastructure::http::{ProductHttpClient, UserProfileHttpClient};
use crate::infrastructure::postgres::repositories::PostgresAggregateStore;
use crate::infrastructure::postgres::utils::run_postgres_migrations;

/// Ingress HTTP + worker d'agrégation dans un même processus, jusqu'à Ctrl+C / SIGTERM.
pub async fn run_aggregation_service() -> AppResult<()> {
    init_tracing("info");
    tracing::info!("🚀 Starting Aggregation Service...");

    let config = AggregationConfig::from_env()?;

    // --- 1. STOCKAGE ---

    let postgres = PostgresContext::builder()?.build().await?;
    run_postgres_migrations(&postgres.pool())
        .await
        .map_err(|e| AppError::internal(format!("Postgres migrations failed: {e}")))?;

    let redis = RedisContext::builder()?.build().await?;

    // --- 2. MESSAGERIE ---

    let kafka = KafkaConfig::from_env();
    let producer = Arc::new(KafkaMessageProducer::new(&kafka)?);
    let consumer = Arc::new(KafkaMessageConsumer::new(&kafka, &[config.topics.request.as_str()])?);

    // --- 3. SERVICES EN AVAL ---

    let http = config.downstream.build_client()?;
    let profiles = UserProfileHttpClient::new(&config.downstream.user_service_url, http.clone())?;
    let products = ProductHttpClient::new(&config.downstream.product_service_url, http)?;

    // --- 4. CONTEXTE PARTAGÉ ---

    let context = AggregationContext {
        cache: redis.repository(),
        store: Arc::new(PostgresAggregateStore::new(postgres.pool())),
        profiles: Arc::new(profiles),
        products: Arc::new(products),
        producer,
        consumer,
        topics: config.topics.clone(),
    };

    // --- 5. WORKER ---

    let shutdown = CancellationToken::new();
    let worker = context.worker(config.worker.clone()).spawn(shutdown.child_token());

    // --- 6. INGRESS HTTP ---

    let state = ApiState::new(context.submit_use_case(), JwtVerifier::new(&config.jwt));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("✅ Aggregation ingress listening on {}", addr);

    let served = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server error: {e}")));

    // --- 7. ARRÊT ---

    worker.shutdown().await;
    redis.close().await;
    postgres.close().await;

    tracing::info!("👋 Aggregation Service stopped");
    served
}
