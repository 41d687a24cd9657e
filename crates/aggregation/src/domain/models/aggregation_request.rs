// crates/aggregation/src/domain/models/aggregation_request.rs

use serde::{Deserialize, Serialize};
use shared_kernel::errors::{AppError, AppResult};

use crate::domain::value_objects::{AccessToken, Email, ProductId, RequestId, UserId};

/// Demande d'agrégation publiée sur `api.request`. Immuable après création.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationRequest {
    pub request_id: RequestId,
    pub user_id: UserId,
    pub product_ids: Vec<ProductId>,
    pub token: AccessToken,
    pub email: Option<Email>,
}

/// Contrat JSON du topic
#[derive(Serialize, Deserialize)]
struct AggregationRequestPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_id: Option<RequestId>,
    user_id: String,
    #[serde(default)]
    product_ids: Vec<ProductId>,
    token: AccessToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl AggregationRequest {
    pub fn new(
        user_id: UserId,
        product_ids: Vec<ProductId>,
        token: AccessToken,
        email: Option<Email>,
    ) -> Self {
        Self {
            request_id: RequestId::new(),
            user_id,
            product_ids,
            token,
            email,
        }
    }

    /// Décode un message du broker. Toute erreur est une erreur de validation (non rejouable).
    pub fn from_payload(payload: &[u8]) -> AppResult<Self> {
        let raw: AggregationRequestPayload = serde_json::from_slice(payload)
            .map_err(|e| AppError::validation(format!("Malformed aggregation request: {e}")))?;

        let user_id = UserId::try_new(raw.user_id)?;

        // Un email illisible équivaut à un email absent : le profil sera vide
        let email = raw.email.and_then(|value| match Email::try_new(value) {
            Ok(email) => Some(email),
            Err(e) => {
                tracing::warn!("Ignoring unusable email for user {}: {}", user_id, e);
                None
            }
        });

        Ok(Self {
            request_id: raw.request_id.unwrap_or_default(),
            user_id,
            product_ids: raw.product_ids,
            token: raw.token,
            email,
        })
    }

    pub fn to_payload(&self) -> AppResult<Vec<u8>> {
        let raw = AggregationRequestPayload {
            request_id: Some(self.request_id),
            user_id: self.user_id.as_str().to_string(),
            product_ids: self.product_ids.clone(),
            token: self.token.clone(),
            email: self.email.as_ref().map(|e| e.as_str().to_string()),
        };

        serde_json::to_vec(&raw)
            .map_err(|e| AppError::internal(format!("Failed to serialize aggregation request: {e}")))
    }
}
