// crates/aggregation/src/application/mod.rs

pub mod aggregate;
pub mod context;
pub mod submit_request;
pub mod workers;

pub use context::{AggregationContext, Topics};
