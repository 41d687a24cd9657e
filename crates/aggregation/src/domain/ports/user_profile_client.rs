// crates/aggregation/src/domain/ports/user_profile_client.rs

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::value_objects::{AccessToken, Email};

pub type UserProfile = Map<String, Value>;

#[async_trait]
pub trait UserProfileClient: Send + Sync {
    /// Lecture du profil par email. `None` pour toute réponse autre qu'un succès :
    /// introuvable, erreur serveur et timeout ne sont pas distingués.
    async fn fetch_profile(&self, email: &Email, token: &AccessToken) -> Option<UserProfile>;
}
