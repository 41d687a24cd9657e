// crates/aggregation/src/infrastructure/config/mod.rs

mod aggregation_config;

pub use aggregation_config::AggregationConfig;
