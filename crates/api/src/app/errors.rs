//! Error translation at the API boundary.
//!
//! Response bodies stay generic so failures give no account-existence or
//! token-validity oracle; the `X-Error-Detail` header carries the specific
//! internal reason for trusted clients and log scrapers. The full reason is
//! also logged before translation.

use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;

use leaguehub_auth::{AccessError, AuthenticationError, AuthorizationError};

pub const X_ERROR_DETAIL: &str = "x-error-detail";

pub const GENERIC_UNAUTHORIZED: &str = "unauthorized";
pub const GENERIC_LOGIN_FAILED: &str = "authentication failed";
pub const GENERIC_MAINTENANCE: &str = "service temporarily unavailable for maintenance";

/// Translate a core denial into the black-box response contract.
pub fn access_error_response(err: &AccessError) -> axum::response::Response {
    match err {
        AccessError::Verification(e) => {
            detailed(StatusCode::UNAUTHORIZED, GENERIC_UNAUTHORIZED, &e.to_string())
        }

        AccessError::Authentication(e) => match e {
            AuthenticationError::InvalidCredentials
            | AuthenticationError::Unconfirmed
            | AuthenticationError::InvalidApiToken => {
                detailed(StatusCode::UNAUTHORIZED, GENERIC_LOGIN_FAILED, &e.to_string())
            }
            AuthenticationError::Directory(_) | AuthenticationError::Signing(_) => internal(err),
        },

        AccessError::Authorization(AuthorizationError::Maintenance) => detailed(
            StatusCode::SERVICE_UNAVAILABLE,
            GENERIC_MAINTENANCE,
            "maintenance mode enabled",
        ),

        AccessError::Authorization(e @ AuthorizationError::Unauthorized(_)) => {
            detailed(StatusCode::FORBIDDEN, GENERIC_UNAUTHORIZED, &e.to_string())
        }

        AccessError::Grants(_) => internal(err),
    }
}

pub fn json_error(status: StatusCode, message: &str) -> axum::response::Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

fn detailed(status: StatusCode, generic: &str, detail: &str) -> axum::response::Response {
    let mut response = json_error(status, generic);
    if let Ok(value) = HeaderValue::from_str(detail) {
        response.headers_mut().insert(X_ERROR_DETAIL, value);
    }
    response
}

fn internal(err: &AccessError) -> axum::response::Response {
    tracing::error!("access decision failed: {err}");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}
