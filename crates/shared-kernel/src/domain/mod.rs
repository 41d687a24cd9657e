// crates/shared-kernel/src/domain/mod.rs

pub mod messages;
pub mod repositories;
pub mod value_objects;
