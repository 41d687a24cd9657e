// crates/shared-kernel/src/domain/messages/mod.rs

mod dead_letter;
mod inbound_message;
mod outbound_message;

pub use dead_letter::DeadLetter;
pub use inbound_message::InboundMessage;
pub use outbound_message::OutboundMessage;
