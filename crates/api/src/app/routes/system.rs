use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// GET /whoami - the context an allowed request hands to resource handlers
pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "subject": principal.subject().to_string(),
        "is_global_admin": principal.permissions().is_global_admin(),
        "entities": principal
            .permissions()
            .scoped_entities()
            .map(|k| k.as_str())
            .collect::<Vec<_>>(),
    }))
}
