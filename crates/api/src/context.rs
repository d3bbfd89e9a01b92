use leaguehub_auth::{AccessContext, PermissionSet};
use leaguehub_core::UserId;

/// Principal context for a request (authenticated subject + resolved
/// permission set), inserted by the guard middleware on ALLOW.
///
/// This is exactly what the access core forwards to resource handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    subject: UserId,
    permissions: PermissionSet,
}

impl PrincipalContext {
    pub fn subject(&self) -> UserId {
        self.subject
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }
}

impl From<AccessContext> for PrincipalContext {
    fn from(ctx: AccessContext) -> Self {
        Self {
            subject: ctx.subject,
            permissions: ctx.permissions,
        }
    }
}
