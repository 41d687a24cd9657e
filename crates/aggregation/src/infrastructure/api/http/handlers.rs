// crates/aggregation/src/infrastructure/api/http/handlers.rs

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use shared_kernel::errors::AppError;

use crate::application::submit_request::SubmitRequestCommand;
use crate::domain::models::AggregateResult;
use crate::infrastructure::api::http::{ApiError, ApiState, bearer_token};

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Debug, Deserialize)]
pub struct AggregateRequestBody {
    pub user_id: String,
    pub product_ids: Vec<String>,
}

/// Acquitte immédiatement avec un agrégat vide ; le vrai résultat part sur le topic de réponse.
pub async fn submit_aggregation(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    // 1. Authentification avant toute lecture du corps
    let raw_token = bearer_token(&headers)
        .ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;
    let verified = state.verifier.verify(raw_token)?;

    // 2. Corps
    let body: AggregateRequestBody = serde_json::from_slice(&body)
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

    // 3. Publication
    let request_id = state
        .submit
        .execute(SubmitRequestCommand {
            user_id: body.user_id,
            product_ids: body.product_ids,
            token: verified.token,
            email: verified.email,
        })
        .await?;

    let mut response = (StatusCode::ACCEPTED, Json(AggregateResult::empty())).into_response();
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    Ok(response)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
