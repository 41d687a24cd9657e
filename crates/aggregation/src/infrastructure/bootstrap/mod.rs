// crates/aggregation/src/infrastructure/bootstrap/mod.rs

mod service;

pub use service::run_aggregation_service;
