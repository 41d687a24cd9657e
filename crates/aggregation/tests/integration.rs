// crates/aggregation/tests/integration.rs

mod common;
mod infrastructure;
