//! Session token issuance and verification.
//!
//! Tokens are compact HS256 JWS strings carrying only the subject id and a
//! validity window (see [`crate::claims`]). They are stateless: nothing is
//! persisted at issue time and nothing is looked up at verify time. In
//! particular, verification does **not** re-check that the identity still
//! exists in the directory — that is a stated policy, not an oversight; the
//! caller re-hits the grant store anyway, and a deleted identity resolves to
//! an empty permission set.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};
use crate::identity::{DirectoryError, IdentityDirectory};
use crate::password::verify_password;

/// Default session lifetime, overridable via configuration (not per-call).
pub const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Login failure, raised only by the [`TokenIssuer`].
///
/// `Unconfirmed` and `InvalidCredentials` are distinguished here (and logged
/// distinctly) but collapsed into one externally visible reason at the API
/// boundary, so responses give no account-existence oracle.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account not confirmed")]
    Unconfirmed,

    /// The static login API token did not match the configured value.
    #[error("invalid token")]
    InvalidApiToken,

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Token verification failure, raised only by the [`TokenVerifier`].
///
/// All causes are normalized to one generic response externally; they stay
/// distinct here for logging and tests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("missing bearer credentials")]
    Missing,

    #[error("malformed token")]
    Malformed,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    /// Only ever produced through a [`RevocationProbe`]; the core ships no
    /// revocation list.
    #[error("token revoked")]
    Revoked,
}

// ─────────────────────────────────────────────────────────────────────────────
// Bearer scheme
// ─────────────────────────────────────────────────────────────────────────────

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, VerificationError> {
    let header = header.ok_or(VerificationError::Missing)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(VerificationError::Missing)?
        .trim();
    if token.is_empty() {
        return Err(VerificationError::Missing);
    }
    Ok(token)
}

// ─────────────────────────────────────────────────────────────────────────────
// Issuer
// ─────────────────────────────────────────────────────────────────────────────

/// A freshly minted session token plus the claims it encodes.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: JwtClaims,
}

/// Mints signed session tokens for verified identities.
pub struct TokenIssuer {
    directory: Arc<dyn IdentityDirectory>,
    encoding: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(directory: Arc<dyn IdentityDirectory>, secret: &[u8], ttl: Duration) -> Self {
        Self {
            directory,
            encoding: EncodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Verify `(email, password)` against the directory and mint a token.
    ///
    /// Unknown email and wrong password are deliberately the same error.
    pub async fn issue(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthenticationError> {
        let Some(identity) = self.directory.find_by_email(email).await? else {
            tracing::debug!("login rejected: unknown email");
            return Err(AuthenticationError::InvalidCredentials);
        };

        if !verify_password(password, &identity.password_hash) {
            tracing::debug!(subject = %identity.id, "login rejected: password mismatch");
            return Err(AuthenticationError::InvalidCredentials);
        }

        if !identity.confirmed {
            tracing::debug!(subject = %identity.id, "login rejected: unconfirmed account");
            return Err(AuthenticationError::Unconfirmed);
        }

        let claims = JwtClaims::for_session(identity.id, now, self.ttl);
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(AuthenticationError::Signing)?;

        Ok(IssuedToken { token, claims })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Verifier
// ─────────────────────────────────────────────────────────────────────────────

/// Optional revocation seam.
///
/// There is no server-side revocation list in this design; tokens die only by
/// expiry. Deployments that need one can plug a probe in here without the
/// verifier growing any storage of its own.
pub trait RevocationProbe: Send + Sync {
    fn is_revoked(&self, claims: &JwtClaims) -> bool;
}

/// Validates an inbound token and recovers the claimed subject.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, VerificationError>;
}

/// HS256 verifier sharing the issuer's signing secret.
pub struct Hs256TokenVerifier {
    decoding: DecodingKey,
    validation: Validation,
    revocation: Option<Arc<dyn RevocationProbe>>,
}

impl Hs256TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The claims window uses chrono timestamps, not the numeric `exp`
        // claim, so expiry is checked by `validate_claims` instead.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding: DecodingKey::from_secret(secret),
            validation,
            revocation: None,
        }
    }

    pub fn with_revocation_probe(mut self, probe: Arc<dyn RevocationProbe>) -> Self {
        self.revocation = Some(probe);
        self
    }
}

impl TokenVerifier for Hs256TokenVerifier {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, VerificationError> {
        let decoded = decode::<JwtClaims>(token, &self.decoding, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => VerificationError::InvalidSignature,
                _ => {
                    tracing::debug!("token rejected as malformed: {e}");
                    VerificationError::Malformed
                }
            },
        )?;

        let claims = decoded.claims;
        validate_claims(&claims, now).map_err(|e| {
            tracing::debug!(subject = %claims.sub, "token claims rejected: {e}");
            match e {
                TokenValidationError::Expired => VerificationError::Expired,
                TokenValidationError::NotYetValid | TokenValidationError::InvalidTimeWindow => {
                    VerificationError::Malformed
                }
            }
        })?;

        if let Some(probe) = &self.revocation {
            if probe.is_revoked(&claims) {
                return Err(VerificationError::Revoked);
            }
        }

        Ok(claims)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use crate::password::hash_password;
    use async_trait::async_trait;
    use leaguehub_core::UserId;
    use std::collections::HashMap;

    struct StubDirectory {
        by_email: HashMap<String, Identity>,
    }

    impl StubDirectory {
        fn with(identities: Vec<Identity>) -> Arc<Self> {
            Arc::new(Self {
                by_email: identities
                    .into_iter()
                    .map(|i| (i.email.clone(), i))
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl IdentityDirectory for StubDirectory {
        async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DirectoryError> {
            Ok(self.by_email.get(email).cloned())
        }
    }

    fn identity(email: &str, password: &str, confirmed: bool) -> Identity {
        Identity {
            id: UserId::new(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            confirmed,
        }
    }

    fn issuer_for(identities: Vec<Identity>, secret: &[u8]) -> TokenIssuer {
        TokenIssuer::new(StubDirectory::with(identities), secret, Duration::hours(1))
    }

    #[tokio::test]
    async fn issue_then_verify_recovers_subject() {
        let alice = identity("alice@fed.example", "pw1", true);
        let subject = alice.id;
        let issuer = issuer_for(vec![alice], b"s3cret");
        let verifier = Hs256TokenVerifier::new(b"s3cret");

        let now = Utc::now();
        let issued = issuer.issue("alice@fed.example", "pw1", now).await.unwrap();
        let claims = verifier.verify(&issued.token, now).unwrap();
        assert_eq!(claims.sub, subject);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let issuer = issuer_for(vec![identity("alice@fed.example", "pw1", true)], b"s3cret");
        let err = issuer
            .issue("alice@fed.example", "wrong", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthenticationError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials() {
        let issuer = issuer_for(vec![], b"s3cret");
        let err = issuer
            .issue("nobody@fed.example", "pw1", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthenticationError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unconfirmed_is_distinguished_from_bad_credentials() {
        let issuer = issuer_for(vec![identity("dora@fed.example", "pw1", false)], b"s3cret");
        let err = issuer
            .issue("dora@fed.example", "pw1", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthenticationError::Unconfirmed));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let issuer = issuer_for(vec![identity("alice@fed.example", "pw1", true)], b"s3cret");
        let verifier = Hs256TokenVerifier::new(b"s3cret");

        let now = Utc::now();
        let issued = issuer.issue("alice@fed.example", "pw1", now).await.unwrap();
        let later = now + Duration::hours(2);
        assert_eq!(
            verifier.verify(&issued.token, later),
            Err(VerificationError::Expired)
        );
    }

    #[tokio::test]
    async fn foreign_secret_is_invalid_signature() {
        let issuer = issuer_for(vec![identity("alice@fed.example", "pw1", true)], b"s3cret");
        let verifier = Hs256TokenVerifier::new(b"other-secret");

        let now = Utc::now();
        let issued = issuer.issue("alice@fed.example", "pw1", now).await.unwrap();
        assert_eq!(
            verifier.verify(&issued.token, now),
            Err(VerificationError::InvalidSignature)
        );
    }

    #[test]
    fn garbage_token_is_malformed() {
        let verifier = Hs256TokenVerifier::new(b"s3cret");
        assert_eq!(
            verifier.verify("not-a-jwt", Utc::now()),
            Err(VerificationError::Malformed)
        );
    }

    #[test]
    fn bearer_parsing() {
        assert_eq!(parse_bearer(Some("Bearer abc")), Ok("abc"));
        assert_eq!(parse_bearer(None), Err(VerificationError::Missing));
        assert_eq!(parse_bearer(Some("abc")), Err(VerificationError::Missing));
        assert_eq!(parse_bearer(Some("Bearer ")), Err(VerificationError::Missing));
        assert_eq!(
            parse_bearer(Some("Basic dXNlcjpwdw==")),
            Err(VerificationError::Missing)
        );
    }

    #[tokio::test]
    async fn revocation_probe_is_consulted() {
        struct RevokeAll;
        impl RevocationProbe for RevokeAll {
            fn is_revoked(&self, _claims: &JwtClaims) -> bool {
                true
            }
        }

        let issuer = issuer_for(vec![identity("alice@fed.example", "pw1", true)], b"s3cret");
        let verifier =
            Hs256TokenVerifier::new(b"s3cret").with_revocation_probe(Arc::new(RevokeAll));

        let now = Utc::now();
        let issued = issuer.issue("alice@fed.example", "pw1", now).await.unwrap();
        assert_eq!(
            verifier.verify(&issued.token, now),
            Err(VerificationError::Revoked)
        );
    }

    mod tamper_proptests {
        use super::*;
        use base64::Engine;
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        use proptest::prelude::*;

        async fn fresh_token() -> String {
            let issuer =
                issuer_for(vec![identity("alice@fed.example", "pw1", true)], b"s3cret");
            issuer
                .issue("alice@fed.example", "pw1", Utc::now())
                .await
                .unwrap()
                .token
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            /// Property: any single bit flipped in the signature segment is
            /// detected as an invalid signature, and never panics.
            #[test]
            fn signature_bit_flip_is_detected(bit in 0usize..256) {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .unwrap();
                let token = rt.block_on(fresh_token());

                let (head, sig_b64) = token.rsplit_once('.').unwrap();
                let mut sig = URL_SAFE_NO_PAD.decode(sig_b64).unwrap();
                sig[bit / 8] ^= 1 << (bit % 8);
                let tampered = format!("{head}.{}", URL_SAFE_NO_PAD.encode(sig));

                let verifier = Hs256TokenVerifier::new(b"s3cret");
                prop_assert_eq!(
                    verifier.verify(&tampered, Utc::now()),
                    Err(VerificationError::InvalidSignature)
                );
            }
        }
    }
}
