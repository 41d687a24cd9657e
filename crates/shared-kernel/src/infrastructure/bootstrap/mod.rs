// crates/shared-kernel/src/infrastructure/bootstrap/mod.rs

mod shutdown;
mod telemetry;

pub use shutdown::shutdown_signal;
pub use telemetry::init_tracing;
