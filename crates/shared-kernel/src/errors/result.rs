// crates/shared-kernel/src/errors/result.rs

use crate::errors::{AppError, DomainError};

/// Result du domaine : value objects, modèles, règles métier.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Result d'application : workers, API, adaptateurs d'infrastructure.
/// Porte aussi bien les erreurs techniques (Kafka down) que métier.
pub type AppResult<T> = std::result::Result<T, AppError>;
