// crates/aggregation/src/infrastructure/api/http/auth.rs

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::Value;
use shared_kernel::errors::{AppError, AppResult};
use shared_kernel::infrastructure::env::{env_or, env_required};

use crate::domain::value_objects::{AccessToken, Email};

#[derive(Clone)]
pub struct JwtConfig {
    /// Secret HS256 partagé avec l'émetteur des jetons
    pub secret: String,
    pub leeway_seconds: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            leeway_seconds: 0,
        }
    }

    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            secret: env_required("SECRET_KEY")?,
            leeway_seconds: env_or("JWT_LEEWAY_SECONDS", 0u64)?,
        })
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

/// Jeton vérifié : la forme brute est conservée pour être relayée en aval
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub token: AccessToken,
    pub email: Option<Email>,
}

#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256];
        validation.leeway = config.leeway_seconds;
        // `exp` contrôlé seulement s'il est présent
        validation.required_spec_claims.clear();
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, raw: &str) -> AppResult<VerifiedToken> {
        let claims = decode::<Value>(raw, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("JWT rejected: {}", e);
                AppError::unauthorized("Invalid or expired token")
            })?;

        let email = claims
            .get("email")
            .and_then(Value::as_str)
            .and_then(|raw| Email::try_new(raw).ok());

        Ok(VerifiedToken {
            token: AccessToken::new(raw),
            email,
        })
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?;
    // Le schéma est insensible à la casse
    let (scheme, token) = raw.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
