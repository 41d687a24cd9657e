// crates/aggregation/src/domain/ports/downstream_client_stubs.rs

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::ports::{ProductClient, UserProfile, UserProfileClient};
use crate::domain::value_objects::{AccessToken, Email, ProductId};

#[derive(Default)]
pub struct UserProfileClientStub {
    pub profiles: Mutex<HashMap<String, UserProfile>>,
    /// (email, token) de chaque appel
    pub calls: Mutex<Vec<(String, String)>>,
}

impl UserProfileClientStub {
    pub fn with_profile(self, email: &str, profile: Value) -> Self {
        if let Value::Object(map) = profile {
            self.profiles.lock().unwrap().insert(email.to_string(), map);
        }
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UserProfileClient for UserProfileClientStub {
    async fn fetch_profile(&self, email: &Email, token: &AccessToken) -> Option<UserProfile> {
        self.calls
            .lock()
            .unwrap()
            .push((email.as_str().to_string(), token.as_str().to_string()));
        self.profiles.lock().unwrap().get(email.as_str()).cloned()
    }
}

#[derive(Default)]
pub struct ProductClientStub {
    pub products: Mutex<HashMap<String, Value>>,
    /// (product_id, token) de chaque appel, dans l'ordre
    pub calls: Mutex<Vec<(String, String)>>,
    /// Latence simulée, utile pour provoquer des vols concurrents
    pub delay: Option<Duration>,
}

impl ProductClientStub {
    pub fn with_product(self, id: &str, product: Value) -> Self {
        self.products.lock().unwrap().insert(id.to_string(), product);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requested_ids(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(id, _)| id.clone()).collect()
    }
}

#[async_trait]
impl ProductClient for ProductClientStub {
    async fn fetch_product(&self, id: &ProductId, token: &AccessToken) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((id.as_str().to_string(), token.as_str().to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.products.lock().unwrap().get(id.as_str()).cloned()
    }
}
