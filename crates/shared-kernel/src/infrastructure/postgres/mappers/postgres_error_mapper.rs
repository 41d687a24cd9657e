// crates/shared-kernel/src/infrastructure/postgres/mappers/postgres_error_mapper.rs

use crate::errors::{AppError, ErrorCode};

pub trait SqlxErrorExt<T> {
    /// Traduit une erreur sqlx en `AppError` en préfixant le contexte de l'appel
    fn map_infra(self, context: &'static str) -> Result<T, AppError>;
}

impl<T> SqlxErrorExt<T> for std::result::Result<T, sqlx::Error> {
    fn map_infra(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            let code = match &e {
                // Pool saturé ou connexion perdue : transitoire
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                    ErrorCode::ServiceUnavailable
                }
                // Violation de contrainte (classe 23) : rejouer ne changera rien
                sqlx::Error::Database(db_err)
                    if db_err.code().map(|c| c.starts_with("23")).unwrap_or(false) =>
                {
                    ErrorCode::InternalError
                }
                _ => ErrorCode::InfrastructureFailure,
            };

            tracing::error!("{}: {:?}", context, e);
            AppError::new(code, format!("{}: {}", context, e))
        })
    }
}
