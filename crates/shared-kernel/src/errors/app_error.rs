// crates/shared-kernel/src/errors/app_error.rs

use crate::errors::{DomainError, ErrorCode};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InfrastructureFailure, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Utilisé par la politique de retry des workers
    pub fn is_retryable(&self) -> bool {
        self.code.is_transient()
    }
}

impl From<DomainError> for AppError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation { field, reason } => Self {
                code: ErrorCode::ValidationFailed,
                message: format!("Validation failed for {field}"),
                details: Some(serde_json::json!({ "field": field, "reason": reason })),
            },

            DomainError::Unauthorized { reason } => Self::new(ErrorCode::Unauthorized, reason),

            DomainError::Infrastructure(reason) => Self::new(ErrorCode::InfrastructureFailure, reason),

            DomainError::Internal(reason) => Self::new(ErrorCode::InternalError, reason),
        }
    }
}

// Erreurs SQL (sqlx) : le détail reste dans les logs
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database infrastructure error: {:?}", err);

        Self::new(ErrorCode::InfrastructureFailure, "A database error occurred")
    }
}

#[cfg(feature = "kafka")]
impl From<rdkafka::error::KafkaError> for AppError {
    fn from(err: rdkafka::error::KafkaError) -> Self {
        tracing::error!("Kafka infrastructure error: {:?}", err);

        Self::new(
            ErrorCode::ServiceUnavailable,
            format!("Messaging system error: {}", err),
        )
    }
}

#[cfg(feature = "redis")]
impl From<fred::error::Error> for AppError {
    fn from(err: fred::error::Error) -> Self {
        Self::new(ErrorCode::InfrastructureFailure, format!("Cache error: {}", err))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_not_retryable() {
        let err: AppError = DomainError::Validation {
            field: "user_id",
            reason: "empty".into(),
        }
        .into();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(!err.is_retryable());
        assert_eq!(err.details.unwrap()["field"], "user_id");
    }

    #[test]
    fn infrastructure_errors_are_retryable() {
        assert!(AppError::infrastructure("redis down").is_retryable());
        assert!(AppError::unavailable("kafka down").is_retryable());
        assert!(!AppError::internal("bug").is_retryable());
    }

    #[test]
    fn serializes_code_in_screaming_snake_case() {
        let json = serde_json::to_value(AppError::unauthorized("bad token")).unwrap();

        assert_eq!(json["code"], "UNAUTHORIZED");
        assert_eq!(json["message"], "bad token");
        assert!(json.get("details").is_none());
    }
}
