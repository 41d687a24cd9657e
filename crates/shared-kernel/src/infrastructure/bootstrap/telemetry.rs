// crates/shared-kernel/src/infrastructure/bootstrap/telemetry.rs

use tracing_subscriber::EnvFilter;

/// Initialise les logs structurés. `RUST_LOG` surcharge le niveau par défaut.
/// Sans effet si un subscriber est déjà installé (tests).
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
