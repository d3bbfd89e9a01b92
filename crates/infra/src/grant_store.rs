//! In-memory grant store (dev/test).

use std::sync::RwLock;

use async_trait::async_trait;

use leaguehub_core::{EntityKind, UserId};
use leaguehub_auth::{Grant, GrantStore, GrantStoreError};

/// Grant rows held in process memory.
///
/// `grant`/`revoke` model the administrative tooling that owns the write
/// side; the access core only ever calls [`GrantStore::grants_for`]. Writers
/// may run concurrently with in-flight decisions — readers see a
/// point-in-time snapshot, which is all the core asks for.
#[derive(Debug, Default)]
pub struct InMemoryGrantStore {
    rows: RwLock<Vec<Grant>>,
}

impl InMemoryGrantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, grant: Grant) {
        self.rows.write().expect("grant lock poisoned").push(grant);
    }

    /// Remove one grant row (exact match on scope).
    pub fn revoke(&self, user_id: UserId, entity: Option<EntityKind>) {
        self.rows
            .write()
            .expect("grant lock poisoned")
            .retain(|g| !(g.user_id == user_id && g.entity == entity));
    }

    pub fn revoke_all(&self, user_id: UserId) {
        self.rows
            .write()
            .expect("grant lock poisoned")
            .retain(|g| g.user_id != user_id);
    }
}

#[async_trait]
impl GrantStore for InMemoryGrantStore {
    async fn grants_for(&self, user_id: UserId) -> Result<Vec<Grant>, GrantStoreError> {
        Ok(self
            .rows
            .read()
            .map_err(|_| GrantStoreError::Unavailable("grant lock poisoned".into()))?
            .iter()
            .filter(|g| g.user_id == user_id)
            .copied()
            .collect())
    }
}
