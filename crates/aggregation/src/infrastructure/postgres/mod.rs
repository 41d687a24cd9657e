// crates/aggregation/src/infrastructure/postgres/mod.rs

pub mod repositories;
pub mod utils;
