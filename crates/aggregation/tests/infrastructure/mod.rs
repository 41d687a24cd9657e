// crates/aggregation/tests/infrastructure/mod.rs

mod aggregation_pipeline_it;
mod postgres_aggregate_store_it;
mod redis_cache_repository_it;
