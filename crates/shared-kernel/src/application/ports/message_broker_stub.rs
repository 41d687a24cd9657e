// crates/shared-kernel/src/application/ports/message_broker_stub.rs

use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

use crate::application::ports::{MessageConsumer, MessageProducer};
use crate::domain::messages::{InboundMessage, OutboundMessage};
use crate::errors::{AppError, AppResult};

/// Broker en mémoire : une file d'entrée pour `poll`, un journal des publications.
#[derive(Default)]
pub struct MessageBrokerStub {
    inbox: Mutex<VecDeque<AppResult<InboundMessage>>>,
    published: Mutex<Vec<OutboundMessage>>,
    failing_topics: Mutex<HashSet<String>>,
    arrived: Notify,
}

impl MessageBrokerStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, message: InboundMessage) {
        self.inbox.lock().unwrap().push_back(Ok(message));
        self.arrived.notify_one();
    }

    /// Simule une erreur de livraison sur le prochain `poll`
    pub fn push_delivery_error(&self, error: AppError) {
        self.inbox.lock().unwrap().push_back(Err(error));
        self.arrived.notify_one();
    }

    pub fn fail_topic(&self, topic: &str) {
        self.failing_topics.lock().unwrap().insert(topic.to_string());
    }

    pub fn heal_topic(&self, topic: &str) {
        self.failing_topics.lock().unwrap().remove(topic);
    }

    pub fn published(&self) -> Vec<OutboundMessage> {
        self.published.lock().unwrap().clone()
    }

    pub fn published_on(&self, topic: &str) -> Vec<OutboundMessage> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.topic == topic)
            .cloned()
            .collect()
    }

    fn pop(&self) -> Option<AppResult<InboundMessage>> {
        self.inbox.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl MessageConsumer for MessageBrokerStub {
    async fn poll(&self, timeout: Duration) -> AppResult<Option<InboundMessage>> {
        if let Some(next) = self.pop() {
            return next.map(Some);
        }

        let _ = tokio::time::timeout(timeout, self.arrived.notified()).await;

        match self.pop() {
            Some(next) => next.map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl MessageProducer for MessageBrokerStub {
    async fn publish(&self, message: &OutboundMessage) -> AppResult<()> {
        if self.failing_topics.lock().unwrap().contains(&message.topic) {
            return Err(AppError::unavailable(format!(
                "Broker unavailable for topic {}",
                message.topic
            )));
        }
        self.published.lock().unwrap().push(message.clone());
        Ok(())
    }
}
