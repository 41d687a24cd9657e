// crates/aggregation/src/domain/value_objects/email.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};

/// Email servant de clé de lecture au service utilisateurs.
/// Validation volontairement légère : le service distant reste juge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub const MAX_LEN: usize = 254;

    pub fn try_new(value: impl Into<String>) -> Result<Self> {
        let email = Self(value.into().trim().to_string());
        email.validate()?;
        Ok(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Email {
    fn validate(&self) -> Result<()> {
        let valid = match self.0.split_once('@') {
            Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
            None => false,
        };

        if !valid || self.0.len() > Self::MAX_LEN {
            return Err(DomainError::Validation {
                field: "email",
                reason: format!("'{}' is not a valid email address", self.0),
            });
        }
        Ok(())
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        Self::try_new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
