//! Session-less login endpoint.
//!
//! Gated by the static API token rather than a prior session; everything
//! else about the decision (credential check, maintenance gate with admin
//! bypass) happens inside the access core.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::Deserialize;

use crate::app::errors;
use crate::middleware::AuthState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub static_api_token: String,
}

/// POST /session - exchange credentials for a session token
pub async fn login(
    State(state): State<AuthState>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    let issued = state
        .authorizer
        .login(&body.static_api_token, &body.email, &body.password, Utc::now())
        .await;

    match issued {
        Ok(issued) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "msg": "welcome back",
                "jwt": issued.token,
            })),
        )
            .into_response(),
        Err(e) => errors::access_error_response(&e),
    }
}
