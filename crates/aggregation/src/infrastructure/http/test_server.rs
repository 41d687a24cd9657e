// crates/aggregation/src/infrastructure/http/test_server.rs

use axum::Router;

/// Sert `app` sur un port éphémère et retourne son URL de base
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}")
}

/// URL d'un port libéré aussitôt réservé : personne n'y écoute
pub async fn unused_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    format!("http://{addr}")
}
