use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use leaguehub_core::UserId;

/// Session token claims model (transport-agnostic).
///
/// This is the entire payload a session token carries: the subject plus its
/// validity window. Deliberately nothing else — no roles, no grants. Grants
/// are re-resolved on every request so that administrative changes take
/// effect immediately instead of living until token expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl JwtClaims {
    /// Claims for a session starting at `now` with the given lifetime.
    pub fn for_session(sub: UserId, now: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        Self {
            sub,
            issued_at: now,
            expires_at: now + ttl,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate token claims.
///
/// Note: this validates the *claims* only. Signature verification / decoding
/// happens in [`crate::token`] before this is called.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims_at(now: DateTime<Utc>, ttl_minutes: i64) -> JwtClaims {
        JwtClaims::for_session(UserId::new(), now, Duration::minutes(ttl_minutes))
    }

    #[test]
    fn valid_inside_window() {
        let now = Utc::now();
        let claims = claims_at(now, 10);
        assert!(validate_claims(&claims, now + Duration::minutes(5)).is_ok());
    }

    #[test]
    fn expired_past_window() {
        let now = Utc::now();
        let claims = claims_at(now, 10);
        assert_eq!(
            validate_claims(&claims, now + Duration::minutes(10)),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn not_yet_valid_before_issue() {
        let now = Utc::now();
        let claims = claims_at(now, 10);
        assert_eq!(
            validate_claims(&claims, now - Duration::seconds(1)),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: UserId::new(),
            issued_at: now,
            expires_at: now - Duration::minutes(1),
        };
        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }
}
