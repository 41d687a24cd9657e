// crates/aggregation/tests/common/mod.rs

mod setup_downstream_services;
mod setup_infrastructure;

pub use setup_downstream_services::{DownstreamServices, setup_downstream_services};
pub use setup_infrastructure::{setup_postgres_test_db, setup_redis_test_cache};
