// crates/aggregation/src/infrastructure/api/http/router.rs

use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

use crate::application::submit_request::SubmitRequestUseCase;
use crate::infrastructure::api::http::{JwtVerifier, health, submit_aggregation};

#[derive(Clone)]
pub struct ApiState {
    pub submit: Arc<SubmitRequestUseCase>,
    pub verifier: Arc<JwtVerifier>,
}

impl ApiState {
    pub fn new(submit: SubmitRequestUseCase, verifier: JwtVerifier) -> Self {
        Self {
            submit: Arc::new(submit),
            verifier: Arc::new(verifier),
        }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", post(submit_aggregation))
        .route("/aggregate", post(submit_aggregation))
        .route("/health", get(health))
        .with_state(state)
}
