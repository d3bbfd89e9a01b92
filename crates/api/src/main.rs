use std::sync::Arc;

use axum::{Json, Router, http::StatusCode};

use leaguehub_api::app::{AppDeps, build_app};
use leaguehub_api::config::AppConfig;
use leaguehub_auth::{AtomicMaintenanceSwitch, Grant, Identity, hash_password};
use leaguehub_core::{EntityKind, UserId};
use leaguehub_infra::{InMemoryDirectory, InMemoryGrantStore};

#[tokio::main]
async fn main() {
    leaguehub_observability::init();

    let cfg = AppConfig::from_env();

    // Dev wiring: in-memory collaborators. Real deployments own the
    // directory/grant stores and pass their own implementations in.
    let directory = Arc::new(InMemoryDirectory::new());
    let grants = Arc::new(InMemoryGrantStore::new());
    let maintenance = Arc::new(AtomicMaintenanceSwitch::new(
        std::env::var("MAINTENANCE_MODE").is_ok_and(|v| v == "1"),
    ));

    if let (Ok(email), Ok(password)) = (
        std::env::var("DEV_ADMIN_EMAIL"),
        std::env::var("DEV_ADMIN_PASSWORD"),
    ) {
        let id = UserId::new();
        directory.insert(Identity {
            id,
            email: email.clone(),
            password_hash: hash_password(&password).expect("failed to hash dev admin password"),
            confirmed: true,
        });
        grants.grant(Grant::global(id));
        tracing::warn!(%email, "seeded dev admin identity with a global grant");
    }

    let resources = EntityKind::ALL
        .iter()
        .map(|kind| (*kind, placeholder_router()))
        .collect();

    let app = build_app(
        &cfg,
        AppDeps {
            directory,
            grants,
            maintenance,
            revocation: None,
        },
        resources,
    );

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", cfg.bind_addr));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

/// Stand-in for the embedding application's resource handlers: the guard in
/// front of this is real, the handler is not.
fn placeholder_router() -> Router {
    Router::new().fallback(|| async {
        (
            StatusCode::NOT_IMPLEMENTED,
            Json(serde_json::json!({
                "error": "resource handlers are not mounted in this build"
            })),
        )
    })
}
