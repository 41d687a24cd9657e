// crates/shared-kernel/src/errors/error_code.rs

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationFailed,
    Unauthorized,
    InternalError,
    InfrastructureFailure,
    ServiceUnavailable,
}

impl ErrorCode {
    /// Erreurs techniques transitoires : un nouvel essai peut réussir.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::InfrastructureFailure | Self::ServiceUnavailable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::InfrastructureFailure => "INFRASTRUCTURE_FAILURE",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }
}
