// crates/aggregation/tests/common/setup_downstream_services.rs

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Faux services utilisateur/produit servis sur un port éphémère
pub struct DownstreamServices {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl DownstreamServices {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "))
}

async fn profile(
    State(hits): State<Arc<AtomicUsize>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match query.get("email").map(String::as_str) {
        Some("alice@x.io") => axum::Json(json!({"name": "Alice"})).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn product(
    State(hits): State<Arc<AtomicUsize>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match id.as_str() {
        "p1" => axum::Json(json!({"id": "p1", "price": 10})).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn setup_downstream_services() -> DownstreamServices {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/users/profile", get(profile))
        .route("/products/{id}", get(product))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    DownstreamServices {
        base_url: format!("http://{addr}"),
        hits,
    }
}
