// crates/shared-kernel/src/infrastructure/concurrency/singleflight.rs

//! # Singleflight - Déduplication de requêtes concurrentes
//!
//! Garantit qu'une seule instance d'une opération asynchrone est en cours pour une clé donnée.
//! Le premier appelant (le leader) exécute l'opération, les suivants attendent son résultat.
//!
//! Cas d'usage : plusieurs misses de cache simultanés pour le même utilisateur ne déclenchent
//! qu'un seul fan-out vers les services en aval et une seule écriture en base.

use dashmap::DashMap;
use futures::future::{FutureExt, Shared};
use std::future::Future;
use std::hash::Hash;
use tokio::sync::oneshot;

use crate::errors::{AppError, AppResult};

pub struct Singleflight<K, T>
where
    K: Hash + Eq,
{
    requests: DashMap<K, Shared<oneshot::Receiver<AppResult<T>>>>,
}

/// Retire la clé même si le leader est annulé en plein vol
struct LeaderGuard<'a, K, T>
where
    K: Hash + Eq,
{
    requests: &'a DashMap<K, Shared<oneshot::Receiver<AppResult<T>>>>,
    key: Option<K>,
}

impl<K, T> Drop for LeaderGuard<'_, K, T>
where
    K: Hash + Eq,
{
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.requests.remove(&key);
        }
    }
}

impl<K, T> Default for Singleflight<K, T>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> Singleflight<K, T>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            requests: DashMap::new(),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.requests.len()
    }

    /// Exécute `factory` si aucun vol n'est en cours pour `key`, sinon attend le résultat du leader.
    /// Retourne aussi `true` si l'appelant était le leader.
    pub async fn execute<F, Fut>(&self, key: K, factory: F) -> (AppResult<T>, bool)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        use dashmap::mapref::entry::Entry;

        // Check-and-insert atomique ; le verrou DashMap est relâché avant tout .await
        let (tx, shared_fut) = match self.requests.entry(key.clone()) {
            Entry::Occupied(entry) => (None, entry.get().clone()),
            Entry::Vacant(entry) => {
                let (tx, rx) = oneshot::channel();
                let shared_rx = rx.shared();
                entry.insert(shared_rx.clone());
                (Some(tx), shared_rx)
            }
        };

        let Some(tx) = tx else {
            let result = match shared_fut.await {
                Ok(result) => result,
                Err(_) => Err(AppError::internal("Singleflight leader panicked or dropped")),
            };
            return (result, false);
        };

        let guard = LeaderGuard {
            requests: &self.requests,
            key: Some(key),
        };

        let result = factory().await;

        // Nettoyage avant diffusion : un nouvel appelant relancera un vol frais
        drop(guard);
        let _ = tx.send(result.clone());

        (result, true)
    }
}
