// crates/shared-kernel/src/infrastructure/postgres/utils/mod.rs

#[cfg(feature = "test-utils")] mod postgres_test_context;
#[cfg(feature = "test-utils")] mod postgres_test_context_builder;

#[cfg(feature = "test-utils")] pub use postgres_test_context::PostgresTestContext;
#[cfg(feature = "test-utils")] pub use postgres_test_context_builder::PostgresTestContextBuilder;
