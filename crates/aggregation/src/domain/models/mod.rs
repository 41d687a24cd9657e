// crates/aggregation/src/domain/models/mod.rs

mod aggregate_result;
mod aggregation_request;

pub use aggregate_result::{AGGREGATE_CACHE_TTL, AggregateResult, aggregate_cache_key};
pub use aggregation_request::AggregationRequest;
