// crates/shared-kernel/src/application/ports/mod.rs

mod message_consumer;
mod message_producer;

pub use message_consumer::MessageConsumer;
pub use message_producer::MessageProducer;

#[cfg(any(test, feature = "test-utils"))]
mod message_broker_stub;
#[cfg(any(test, feature = "test-utils"))]
pub use message_broker_stub::MessageBrokerStub;
