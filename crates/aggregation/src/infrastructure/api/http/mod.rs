// crates/aggregation/src/infrastructure/api/http/mod.rs

mod auth;
mod error_mapper;
mod handlers;
mod router;

pub use auth::{JwtConfig, JwtVerifier, VerifiedToken, bearer_token};
pub use error_mapper::ApiError;
pub use handlers::{AggregateRequestBody, health, submit_aggregation};
pub use router::{ApiState, router};
