// crates/aggregation/src/application/submit_request/submit_request_command.rs

use crate::domain::value_objects::{AccessToken, Email};

/// Demande brute reçue par l'ingress, après vérification du jeton
#[derive(Debug, Clone)]
pub struct SubmitRequestCommand {
    pub user_id: String,
    pub product_ids: Vec<String>,
    pub token: AccessToken,
    pub email: Option<Email>,
}
