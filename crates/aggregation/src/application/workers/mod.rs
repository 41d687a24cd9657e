// crates/aggregation/src/application/workers/mod.rs

mod aggregation_worker;

pub use aggregation_worker::{AggregationWorker, MessageOutcome, WorkerConfig, WorkerHandle};

#[cfg(test)]
mod aggregation_worker_test;
