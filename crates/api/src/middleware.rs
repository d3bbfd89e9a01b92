use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use leaguehub_auth::RequestAuthorizer;
use leaguehub_core::EntityKind;

use crate::app::errors;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub authorizer: Arc<RequestAuthorizer>,
}

/// Guard state for one mounted resource kind.
#[derive(Clone)]
pub struct GuardState {
    pub auth: AuthState,
    pub entity: EntityKind,
}

/// Middleware for authenticated endpoints that are not entity-scoped.
pub async fn require_session(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let header = authorization_header(req.headers());
    let decision = state
        .authorizer
        .authenticate(header.as_deref(), Utc::now())
        .await;

    match decision {
        Ok(ctx) => {
            req.extensions_mut().insert(PrincipalContext::from(ctx));
            next.run(req).await
        }
        Err(e) => errors::access_error_response(&e),
    }
}

/// Middleware wrapping one resource kind's router: the full per-request
/// decision (token, maintenance, grant) before any handler runs.
pub async fn entity_guard(
    State(state): State<GuardState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let header = authorization_header(req.headers());
    let decision = state
        .auth
        .authorizer
        .authorize(header.as_deref(), state.entity, Utc::now())
        .await;

    match decision {
        Ok(ctx) => {
            req.extensions_mut().insert(PrincipalContext::from(ctx));
            next.run(req).await
        }
        Err(e) => errors::access_error_response(&e),
    }
}

fn authorization_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
