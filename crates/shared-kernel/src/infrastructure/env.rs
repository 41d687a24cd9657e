// crates/shared-kernel/src/infrastructure/env.rs

use crate::errors::{AppError, AppResult};

/// Variable obligatoire
pub fn env_required(name: &str) -> AppResult<String> {
    std::env::var(name).map_err(|_| AppError::internal(format!("{name} must be set")))
}

/// Variable optionnelle, parsée. Une valeur présente mais invalide est une erreur.
pub fn env_or<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::internal(format!("Invalid {name}: '{raw}'"))),
        Err(_) => Ok(default),
    }
}

/// Variable texte optionnelle ; une chaîne vide compte comme absente
pub fn env_string_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
