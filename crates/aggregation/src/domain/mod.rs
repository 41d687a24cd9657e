// crates/aggregation/src/domain/mod.rs

pub mod models;
pub mod ports;
pub mod repositories;
pub mod value_objects;
