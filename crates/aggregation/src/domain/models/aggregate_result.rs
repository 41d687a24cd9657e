// crates/aggregation/src/domain/models/aggregate_result.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use shared_kernel::errors::{AppError, AppResult};

use crate::domain::value_objects::UserId;

/// Durée de vie fixe d'un agrégat en cache
pub const AGGREGATE_CACHE_TTL: Duration = Duration::from_secs(3600);

pub fn aggregate_cache_key(user_id: &UserId) -> String {
    format!("aggregate:{}", user_id.as_str())
}

/// Vue composite profil + produits.
/// `products` suit l'ordre des identifiants demandés, sans trou pour les fetchs en échec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub user: Map<String, Value>,
    pub products: Vec<Value>,
}

impl AggregateResult {
    pub fn new(user: Map<String, Value>, products: Vec<Value>) -> Self {
        Self { user, products }
    }

    /// Placeholder renvoyé par l'ingress avant que l'agrégation n'ait eu lieu
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string(self)
            .map_err(|e| AppError::internal(format!("Failed to serialize aggregate: {e}")))
    }
}
