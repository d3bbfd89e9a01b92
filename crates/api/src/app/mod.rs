//! HTTP application wiring (Axum router + access-core wiring).
//!
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: the generic-body / detail-header response contract
//!
//! Resource routers are supplied by the embedding application, one per
//! entity kind, and mounted behind the entity guard.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;

use leaguehub_auth::{
    GrantResolver, GrantStore, Hs256TokenVerifier, IdentityDirectory, MaintenanceSwitch,
    RequestAuthorizer, RevocationProbe, TokenIssuer, TokenVerifier,
};
use leaguehub_core::EntityKind;

use crate::config::AppConfig;
use crate::middleware::{self, AuthState, GuardState};

pub mod errors;
pub mod routes;

/// Collaborators the access core reads from. All owned externally.
pub struct AppDeps {
    pub directory: Arc<dyn IdentityDirectory>,
    pub grants: Arc<dyn GrantStore>,
    pub maintenance: Arc<dyn MaintenanceSwitch>,
    /// Optional revocation seam; `None` in every current deployment.
    pub revocation: Option<Arc<dyn RevocationProbe>>,
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(
    cfg: &AppConfig,
    deps: AppDeps,
    resources: Vec<(EntityKind, Router)>,
) -> Router {
    let issuer = TokenIssuer::new(deps.directory, cfg.jwt_secret.as_bytes(), cfg.session_ttl);

    let mut verifier = Hs256TokenVerifier::new(cfg.jwt_secret.as_bytes());
    if let Some(probe) = deps.revocation {
        verifier = verifier.with_revocation_probe(probe);
    }
    let verifier: Arc<dyn TokenVerifier> = Arc::new(verifier);

    let authorizer = Arc::new(RequestAuthorizer::new(
        issuer,
        verifier,
        GrantResolver::new(deps.grants),
        deps.maintenance,
        cfg.login_token.clone(),
    ));
    let auth_state = AuthState { authorizer };

    let session = Router::new()
        .route("/session", post(routes::session::login))
        .with_state(auth_state.clone());

    let introspection = Router::new()
        .route("/whoami", get(routes::system::whoami))
        .layer(axum::middleware::from_fn_with_state(
            auth_state.clone(),
            middleware::require_session,
        ));

    let mut app = Router::new()
        .route("/health", get(routes::system::health))
        .merge(session)
        .merge(introspection);

    for (kind, router) in resources {
        let guard = GuardState {
            auth: auth_state.clone(),
            entity: kind,
        };
        let guarded = router.layer(axum::middleware::from_fn_with_state(
            guard,
            middleware::entity_guard,
        ));
        app = app.nest(&format!("/{}", kind.path_segment()), guarded);
    }

    app.layer(ServiceBuilder::new())
}
