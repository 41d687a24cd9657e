// crates/aggregation/src/infrastructure/http/product_http_client.rs

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use shared_kernel::errors::{AppError, AppResult};

use crate::domain::ports::ProductClient;
use crate::domain::value_objects::{AccessToken, ProductId};

/// `GET {base}/products/{id}`, l'identifiant étant encodé comme segment de chemin
pub struct ProductHttpClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ProductHttpClient {
    pub fn new(base_url: &str, http: reqwest::Client) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::internal(format!("Invalid product service URL '{base_url}': {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::internal(format!("Product service URL cannot be a base: {base_url}")));
        }

        Ok(Self { base_url, http })
    }

    fn product_url(&self, id: &ProductId) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["products", id.as_str()]);
        Some(url)
    }
}

#[async_trait]
impl ProductClient for ProductHttpClient {
    async fn fetch_product(&self, id: &ProductId, token: &AccessToken) -> Option<Value> {
        let url = self.product_url(id)?;

        let response = match self
            .http
            .get(url)
            .header(AUTHORIZATION, token.bearer())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, product_id = %id, "Product service unreachable");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            tracing::debug!("Product service answered {} for {}", response.status(), id);
            return None;
        }

        match response.json::<Value>().await {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(error = %e, product_id = %id, "Unreadable product body");
                None
            }
        }
    }
}
