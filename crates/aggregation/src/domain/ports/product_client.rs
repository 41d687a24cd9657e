// crates/aggregation/src/domain/ports/product_client.rs

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::value_objects::{AccessToken, ProductId};

#[async_trait]
pub trait ProductClient: Send + Sync {
    /// Lecture d'un produit. `None` pour toute réponse autre qu'un succès.
    async fn fetch_product(&self, id: &ProductId, token: &AccessToken) -> Option<Value>;
}
