//! `leaguehub-auth` — identity & access-control core (zero-trust).
//!
//! This crate is intentionally decoupled from HTTP and storage. It issues and
//! verifies stateless session tokens, resolves permission grants into a
//! normalized permission set, gates traffic behind the runtime maintenance
//! switch, and orchestrates all of that into a single allow/deny decision per
//! request. Identities and grant rows are owned by external collaborators and
//! only ever read here, through the ports this crate defines.

pub mod authorize;
pub mod claims;
pub mod grant;
pub mod identity;
pub mod maintenance;
pub mod password;
pub mod token;

pub use authorize::{AccessContext, AccessError, AuthorizationError, RequestAuthorizer};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use grant::{Grant, GrantResolver, GrantStore, GrantStoreError, PermissionSet};
pub use identity::{DirectoryError, Identity, IdentityDirectory};
pub use maintenance::{AtomicMaintenanceSwitch, MaintenanceSwitch, is_request_allowed};
pub use password::{hash_password, verify_password};
pub use token::{
    AuthenticationError, Hs256TokenVerifier, IssuedToken, RevocationProbe, TokenIssuer,
    TokenVerifier, VerificationError, parse_bearer,
};
