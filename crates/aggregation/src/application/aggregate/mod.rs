// crates/aggregation/src/application/aggregate/mod.rs

mod aggregate_use_case;

pub use aggregate_use_case::{AggregateUseCase, AggregationOutcome};
