//! Postgres-backed directory and grant store.
//!
//! Enabled with the `postgres` cargo feature. Uses the sqlx runtime API
//! against the federation database's `identities` and `grants` tables; the
//! schema itself is owned by the administrative tooling's migrations.
//!
//! Grant rows store the entity name as text, `NULL` meaning the global admin
//! grant. Names are validated against the closed [`EntityKind`] set when the
//! row is read; a row that fails to parse fails the decision closed instead
//! of being ignored.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use leaguehub_auth::{
    DirectoryError, Grant, GrantStore, GrantStoreError, Identity, IdentityDirectory,
};
use leaguehub_core::{EntityKind, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// Identity directory
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct IdentityRow {
    id: Uuid,
    email: String,
    password_hash: String,
    confirmed: bool,
}

impl From<IdentityRow> for Identity {
    fn from(row: IdentityRow) -> Self {
        Identity {
            id: UserId::from_uuid(row.id),
            email: row.email,
            password_hash: row.password_hash,
            confirmed: row.confirmed,
        }
    }
}

/// Read-only directory view over the `identities` table.
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityDirectory for PostgresDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DirectoryError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            "SELECT id, email, password_hash, confirmed \
             FROM identities WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Unavailable(e.to_string()))?;

        Ok(row.map(Identity::from))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Grant store
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct GrantRow {
    user_id: Uuid,
    entity: Option<String>,
}

/// Read-only grant view over the `grants` table.
pub struct PostgresGrantStore {
    pool: PgPool,
}

impl PostgresGrantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GrantStore for PostgresGrantStore {
    async fn grants_for(&self, user_id: UserId) -> Result<Vec<Grant>, GrantStoreError> {
        let rows = sqlx::query_as::<_, GrantRow>(
            "SELECT user_id, entity FROM grants WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GrantStoreError::Unavailable(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let entity = match row.entity {
                    None => None,
                    Some(name) => Some(EntityKind::from_str(&name).map_err(|e| {
                        GrantStoreError::InvalidRow(format!("user {}: {e}", row.user_id))
                    })?),
                };
                Ok(Grant {
                    user_id: UserId::from_uuid(row.user_id),
                    entity,
                })
            })
            .collect()
    }
}
