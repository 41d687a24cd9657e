// crates/aggregation/src/infrastructure/mod.rs

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod http;
pub mod postgres;
