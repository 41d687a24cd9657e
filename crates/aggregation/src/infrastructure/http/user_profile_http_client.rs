// crates/aggregation/src/infrastructure/http/user_profile_http_client.rs

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use shared_kernel::errors::{AppError, AppResult};

use crate::domain::ports::{UserProfile, UserProfileClient};
use crate::domain::value_objects::{AccessToken, Email};

/// `GET {base}/users/profile?email=...`
pub struct UserProfileHttpClient {
    profile_url: Url,
    http: reqwest::Client,
}

impl UserProfileHttpClient {
    pub fn new(base_url: &str, http: reqwest::Client) -> AppResult<Self> {
        let mut profile_url = Url::parse(base_url)
            .map_err(|e| AppError::internal(format!("Invalid user service URL '{base_url}': {e}")))?;

        profile_url
            .path_segments_mut()
            .map_err(|_| AppError::internal(format!("User service URL cannot be a base: {base_url}")))?
            .pop_if_empty()
            .extend(["users", "profile"]);

        Ok(Self { profile_url, http })
    }
}

#[async_trait]
impl UserProfileClient for UserProfileHttpClient {
    async fn fetch_profile(&self, email: &Email, token: &AccessToken) -> Option<UserProfile> {
        let response = match self
            .http
            .get(self.profile_url.clone())
            .query(&[("email", email.as_str())])
            .header(AUTHORIZATION, token.bearer())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "User service unreachable");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            tracing::debug!("User service answered {} for profile lookup", response.status());
            return None;
        }

        match response.json::<Value>().await {
            Ok(Value::Object(profile)) => Some(profile),
            Ok(_) => {
                tracing::warn!("User service returned a non-object profile, ignored");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable user profile body");
                None
            }
        }
    }
}
