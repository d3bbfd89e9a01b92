//! Per-request authorization orchestration.
//!
//! One state machine per inbound request:
//!
//! ```text
//! START -> TOKEN_CHECK -> MAINTENANCE_CHECK -> GRANT_CHECK -> ALLOWED
//! ```
//!
//! The ordering is load-bearing: token validity is established before grants
//! are resolved (grants are meaningless for an unauthenticated caller), and
//! the maintenance check runs before the entity check so a lockdown rejects
//! every non-admin outright, independent of whatever scoped grants they hold.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;
use thiserror::Error;

use leaguehub_core::{EntityKind, UserId};

use crate::grant::{GrantResolver, GrantStoreError, PermissionSet};
use crate::maintenance::{MaintenanceSwitch, is_request_allowed};
use crate::token::{
    AuthenticationError, IssuedToken, TokenIssuer, TokenVerifier, VerificationError, parse_bearer,
};

/// Denial raised by the MAINTENANCE_CHECK / GRANT_CHECK stages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("service is in maintenance")]
    Maintenance,

    #[error("no grant for entity '{0}'")]
    Unauthorized(EntityKind),
}

/// Any failure produced by an authorization decision.
///
/// Every variant is caught at the API boundary and translated into the
/// black-box response contract; no raw error reaches a resource handler or
/// the client. Nothing here is retried — these failures are not transient
/// (a `Maintenance` denial is retryable by the *client*, later).
#[derive(Debug, Error)]
pub enum AccessError {
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    Grants(#[from] GrantStoreError),
}

/// What an allowed request hands to the resource handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    pub subject: UserId,
    pub permissions: PermissionSet,
}

/// Orchestrates verifier, grant resolver and maintenance gate into a single
/// allow/deny decision per request, plus the session-less login flow.
pub struct RequestAuthorizer {
    issuer: TokenIssuer,
    verifier: Arc<dyn TokenVerifier>,
    grants: GrantResolver,
    maintenance: Arc<dyn MaintenanceSwitch>,
    login_token: String,
}

impl RequestAuthorizer {
    pub fn new(
        issuer: TokenIssuer,
        verifier: Arc<dyn TokenVerifier>,
        grants: GrantResolver,
        maintenance: Arc<dyn MaintenanceSwitch>,
        login_token: impl Into<String>,
    ) -> Self {
        Self {
            issuer,
            verifier,
            grants,
            maintenance,
            login_token: login_token.into(),
        }
    }

    /// Run TOKEN_CHECK and MAINTENANCE_CHECK without an entity check.
    ///
    /// This is the whole decision for authenticated endpoints that are not
    /// scoped to a resource kind (e.g. introspection).
    pub async fn authenticate(
        &self,
        authorization_header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AccessContext, AccessError> {
        // TOKEN_CHECK
        let token = parse_bearer(authorization_header)?;
        let claims = self.verifier.verify(token, now)?;

        // Grants are resolved before the gate because the gate's admin
        // bypass needs them. Resolved fresh every request, never cached.
        let permissions = self.grants.resolve(claims.sub).await?;

        // MAINTENANCE_CHECK — the flag is read here, at decision time.
        if !is_request_allowed(&permissions, self.maintenance.is_enabled()) {
            tracing::info!(subject = %claims.sub, "request denied: maintenance lockdown");
            return Err(AuthorizationError::Maintenance.into());
        }

        Ok(AccessContext {
            subject: claims.sub,
            permissions,
        })
    }

    /// Decide one authenticated request against `entity`.
    pub async fn authorize(
        &self,
        authorization_header: Option<&str>,
        entity: EntityKind,
        now: DateTime<Utc>,
    ) -> Result<AccessContext, AccessError> {
        let ctx = self.authenticate(authorization_header, now).await?;

        // GRANT_CHECK
        if !ctx.permissions.allows(entity) {
            tracing::info!(subject = %ctx.subject, %entity, "request denied: no grant");
            return Err(AuthorizationError::Unauthorized(entity).into());
        }

        Ok(ctx)
    }

    /// Session-less login flow.
    ///
    /// No TOKEN_CHECK here; the caller presents the static API token
    /// alongside credentials instead. Credentials are verified first because
    /// the maintenance gate's admin bypass needs to know who is asking; a
    /// non-admin logging in during maintenance is turned away after
    /// authentication, without a token.
    pub async fn login(
        &self,
        api_token: &str,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AccessError> {
        if !bool::from(api_token.as_bytes().ct_eq(self.login_token.as_bytes())) {
            tracing::info!("login denied: static api token mismatch");
            return Err(AuthenticationError::InvalidApiToken.into());
        }

        let issued = self.issuer.issue(email, password, now).await?;

        let permissions = self.grants.resolve(issued.claims.sub).await?;
        if !is_request_allowed(&permissions, self.maintenance.is_enabled()) {
            tracing::info!(subject = %issued.claims.sub, "login denied: maintenance lockdown");
            return Err(AuthorizationError::Maintenance.into());
        }

        Ok(issued)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
