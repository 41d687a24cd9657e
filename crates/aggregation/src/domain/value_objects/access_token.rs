// crates/aggregation/src/domain/value_objects/access_token.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Jeton bearer de l'appelant, relayé sans modification aux services en aval.
/// Jamais affiché dans les logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let token = AccessToken::new("secret.jwt.value");
        assert_eq!(format!("{:?}", token), "AccessToken(***)");
        assert_eq!(token.bearer(), "Bearer secret.jwt.value");
    }
}
