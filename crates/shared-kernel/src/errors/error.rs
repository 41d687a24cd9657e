// crates/shared-kernel/src/errors/error.rs

use thiserror::Error;

use crate::errors::AppError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation failed for field '{field}': {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// Identité absente, invalide ou expirée
    #[error("Unauthorized access: {reason}")]
    Unauthorized {
        reason: String,
    },

    /// Erreur liée à l'infrastructure (Kafka, Redis, Postgres)
    #[error("Infrastructure failure: {0}")]
    Infrastructure(String),

    #[error("Internal domain error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<AppError> for DomainError {
    fn from(err: AppError) -> Self {
        match err.code {
            crate::errors::ErrorCode::InfrastructureFailure
            | crate::errors::ErrorCode::ServiceUnavailable => DomainError::Infrastructure(err.message),
            crate::errors::ErrorCode::Unauthorized => DomainError::Unauthorized { reason: err.message },
            _ => DomainError::Internal(err.message),
        }
    }
}
