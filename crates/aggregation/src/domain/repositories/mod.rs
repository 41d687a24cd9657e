// crates/aggregation/src/domain/repositories/mod.rs

mod aggregate_store;
pub use aggregate_store::AggregateStore;

#[cfg(any(test, feature = "test-utils"))]
mod aggregate_store_stub;
#[cfg(any(test, feature = "test-utils"))]
pub use aggregate_store_stub::AggregateStoreStub;
