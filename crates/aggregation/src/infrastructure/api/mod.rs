// crates/aggregation/src/infrastructure/api/mod.rs

pub mod http;
