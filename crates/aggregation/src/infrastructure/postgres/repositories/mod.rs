// crates/aggregation/src/infrastructure/postgres/repositories/mod.rs

mod postgres_aggregate_store;

pub use postgres_aggregate_store::PostgresAggregateStore;
