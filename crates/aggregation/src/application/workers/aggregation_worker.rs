// crates/aggregation/src/application/workers/aggregation_worker.rs

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use shared_kernel::application::ports::{MessageConsumer, MessageProducer};
use shared_kernel::domain::messages::{DeadLetter, InboundMessage};
use shared_kernel::infrastructure::{RetryConfig, RetryFailure, with_retry};

use crate::application::aggregate::{AggregateUseCase, AggregationOutcome};
use crate::domain::models::AggregationRequest;

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Attente maximale d'un `poll` ; borne aussi la latence d'arrêt
    pub poll_timeout: Duration,
    /// Pause après une erreur de livraison du broker
    pub error_backoff: Duration,
    pub retry: RetryConfig,
    /// `None` : les messages en échec définitif sont seulement journalisés
    pub dead_letter_topic: Option<String>,
    /// 1 = traitement strictement séquentiel
    pub max_in_flight: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_secs(1),
            error_backoff: Duration::from_millis(100),
            retry: RetryConfig::default(),
            dead_letter_topic: Some("api.request.dlq".to_string()),
            max_in_flight: 1,
        }
    }
}

/// Sort d'un message du topic de demandes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    Processed(AggregationOutcome),
    DeadLettered { attempts: u32 },
    Dropped { attempts: u32 },
}

pub struct AggregationWorker {
    consumer: Arc<dyn MessageConsumer>,
    producer: Arc<dyn MessageProducer>,
    use_case: Arc<AggregateUseCase>,
    config: WorkerConfig,
}

/// Poignée sur un worker lancé en tâche de fond
pub struct WorkerHandle {
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Demande l'arrêt puis attend la fin des messages en cours
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            tracing::error!("❌ Aggregation worker task failed: {}", e);
        }
    }
}

impl AggregationWorker {
    pub fn new(
        consumer: Arc<dyn MessageConsumer>,
        producer: Arc<dyn MessageProducer>,
        use_case: Arc<AggregateUseCase>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            consumer,
            producer,
            use_case,
            config,
        }
    }

    pub fn spawn(self, shutdown: CancellationToken) -> WorkerHandle {
        let worker = Arc::new(self);
        let token = shutdown.clone();
        let task = tokio::spawn(async move { worker.run(token).await });

        WorkerHandle { shutdown, task }
    }

    /// Boucle de consommation jusqu'à annulation du jeton.
    /// Un message reçu est toujours mené à son terme avant la sortie.
    pub async fn run(self: Arc<Self>, shutdown: CancellationToken) {
        let max_in_flight = self.config.max_in_flight.max(1);
        let limiter = Arc::new(Semaphore::new(max_in_flight));
        let mut tasks = JoinSet::new();

        tracing::info!(
            "🚀 Aggregation worker started (max in flight: {}, dead letters: {})",
            max_in_flight,
            self.config.dead_letter_topic.as_deref().unwrap_or("disabled")
        );

        loop {
            // Le permis est pris avant le poll : avec un seul permis, pas de lecture anticipée
            let permit = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                permit = limiter.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let polled = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                polled = self.consumer.poll(self.config.poll_timeout) => polled,
            };

            match polled {
                Ok(Some(message)) => {
                    let worker = Arc::clone(&self);
                    tasks.spawn(async move {
                        let _permit = permit;
                        worker.handle_message(message).await
                    });
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!("❌ Kafka receive error: {}", e);
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(self.config.error_backoff) => {}
                    }
                }
            }

            while let Some(joined) = tasks.try_join_next() {
                log_join_error(joined);
            }
        }

        tracing::info!("🛑 Aggregation worker stopping, draining {} message(s)", tasks.len());
        while let Some(joined) = tasks.join_next().await {
            log_join_error(joined);
        }
        tracing::info!("✅ Aggregation worker stopped");
    }

    /// Traite un message : décodage, agrégation avec retries bornés, puis lettre morte en cas d'échec.
    /// Ne remonte jamais d'erreur : le worker continue quoi qu'il arrive.
    pub async fn handle_message(&self, message: InboundMessage) -> MessageOutcome {
        tracing::debug!(
            "📨 Message received from {} [{}@{}]",
            message.topic,
            message.partition,
            message.offset
        );

        // Décodé une seule fois : les essais partagent le même request_id
        let result = match AggregationRequest::from_payload(&message.payload) {
            Ok(request) => {
                let request = &request;
                let use_case = &self.use_case;
                with_retry(&self.config.retry, |_attempt| async move {
                    use_case.execute(request).await
                })
                .await
            }
            Err(error) => Err(RetryFailure { error, attempts: 1 }),
        };

        match result {
            Ok(outcome) => MessageOutcome::Processed(outcome),
            Err(failure) => {
                tracing::error!(
                    code = failure.error.code.as_str(),
                    details = ?failure.error.details,
                    "❌ Aggregation failed for message {} [{}@{}] after {} attempt(s): {}",
                    message.topic,
                    message.partition,
                    message.offset,
                    failure.attempts,
                    failure.error.message
                );
                self.dead_letter(&message, failure).await
            }
        }
    }

    async fn dead_letter(&self, message: &InboundMessage, failure: RetryFailure) -> MessageOutcome {
        let attempts = failure.attempts;

        let Some(topic) = self.config.dead_letter_topic.as_deref() else {
            return MessageOutcome::Dropped { attempts };
        };

        let letter = match DeadLetter::from_failure(message, &failure.error, attempts).into_message(topic) {
            Ok(letter) => letter,
            Err(e) => {
                tracing::error!("❌ Failed to encode dead letter: {}", e);
                return MessageOutcome::Dropped { attempts };
            }
        };

        match self.producer.publish(&letter).await {
            Ok(()) => {
                tracing::warn!("☠️ Message {}@{} moved to {}", message.partition, message.offset, topic);
                MessageOutcome::DeadLettered { attempts }
            }
            Err(e) => {
                tracing::error!("❌ Dead letter publish to {} failed, message dropped: {}", topic, e);
                MessageOutcome::Dropped { attempts }
            }
        }
    }
}

fn log_join_error(joined: Result<MessageOutcome, tokio::task::JoinError>) {
    if let Err(e) = joined {
        tracing::error!("❌ Message handler task failed: {}", e);
    }
}
