//! Permission grants and their resolution into a normalized permission set.
//!
//! A grant either names one [`EntityKind`] (scoped) or names nothing at all
//! (global admin). A scoped grant authorizes every capability on its kind —
//! read, create, update, delete. That coarseness is the intended policy, not
//! a gap: nothing in this design differentiates read-only from write access
//! at the grant level, and downstream behavior depends on it staying coarse.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use leaguehub_core::{EntityKind, UserId};

/// One permission grant row, as read from the grant store.
///
/// Grants are created and removed entirely by administrative tooling; the
/// core only reads them at decision time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant {
    pub user_id: UserId,
    /// `None` is the global admin grant (unrestricted).
    pub entity: Option<EntityKind>,
}

impl Grant {
    pub fn global(user_id: UserId) -> Self {
        Self {
            user_id,
            entity: None,
        }
    }

    pub fn scoped(user_id: UserId, entity: EntityKind) -> Self {
        Self {
            user_id,
            entity: Some(entity),
        }
    }
}

/// The resolved, normalized result of evaluating a subject's grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSet {
    is_global_admin: bool,
    scoped: BTreeSet<EntityKind>,
}

impl PermissionSet {
    /// Unrestricted access; supersedes scoped grants and the maintenance flag.
    pub fn global_admin() -> Self {
        Self {
            is_global_admin: true,
            scoped: BTreeSet::new(),
        }
    }

    /// An ordinary authenticated user with no elevated access.
    pub fn none() -> Self {
        Self {
            is_global_admin: false,
            scoped: BTreeSet::new(),
        }
    }

    pub fn scoped_to(entities: impl IntoIterator<Item = EntityKind>) -> Self {
        Self {
            is_global_admin: false,
            scoped: entities.into_iter().collect(),
        }
    }

    /// Normalize a subject's grant rows.
    ///
    /// The first global grant short-circuits: the rest of the rows cannot add
    /// anything beyond unrestricted access.
    pub fn from_grants(grants: impl IntoIterator<Item = Grant>) -> Self {
        let mut scoped = BTreeSet::new();
        for grant in grants {
            match grant.entity {
                None => return Self::global_admin(),
                Some(kind) => {
                    scoped.insert(kind);
                }
            }
        }
        Self {
            is_global_admin: false,
            scoped,
        }
    }

    pub fn is_global_admin(&self) -> bool {
        self.is_global_admin
    }

    pub fn scoped_entities(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.scoped.iter().copied()
    }

    /// True iff the subject may act on `entity` (any capability).
    pub fn allows(&self, entity: EntityKind) -> bool {
        self.is_global_admin || self.scoped.contains(&entity)
    }
}

#[derive(Debug, Error)]
pub enum GrantStoreError {
    #[error("grant store unavailable: {0}")]
    Unavailable(String),

    /// A stored grant row names an entity outside the closed kind set.
    /// Grant validation belongs at creation time; a row that still manages to
    /// be invalid fails the decision closed rather than being guessed at.
    #[error("invalid grant row: {0}")]
    InvalidRow(String),
}

/// Read-side port onto the grant store.
#[async_trait]
pub trait GrantStore: Send + Sync {
    /// All grant rows for a user. Zero rows is a normal outcome.
    async fn grants_for(&self, user_id: UserId) -> Result<Vec<Grant>, GrantStoreError>;
}

/// Loads a subject's grants into a [`PermissionSet`].
///
/// No caching across requests: every decision re-resolves, so a grant added
/// or revoked by an administrator takes effect on the very next request.
pub struct GrantResolver {
    store: Arc<dyn GrantStore>,
}

impl GrantResolver {
    pub fn new(store: Arc<dyn GrantStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, user_id: UserId) -> Result<PermissionSet, GrantStoreError> {
        let grants = self.store.grants_for(user_id).await?;
        Ok(PermissionSet::from_grants(grants))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_grant_short_circuits() {
        let user = UserId::new();
        let set = PermissionSet::from_grants(vec![
            Grant::scoped(user, EntityKind::Team),
            Grant::global(user),
            Grant::scoped(user, EntityKind::Badge),
        ]);
        assert!(set.is_global_admin());
        // Scoped entities are not enumerated once the global grant is seen.
        assert_eq!(set.scoped_entities().count(), 0);
        for kind in EntityKind::ALL {
            assert!(set.allows(kind));
        }
    }

    #[test]
    fn scoped_grants_collect_into_set() {
        let user = UserId::new();
        let set = PermissionSet::from_grants(vec![
            Grant::scoped(user, EntityKind::Badge),
            Grant::scoped(user, EntityKind::Badge),
            Grant::scoped(user, EntityKind::Team),
        ]);
        assert!(!set.is_global_admin());
        assert!(set.allows(EntityKind::Badge));
        assert!(set.allows(EntityKind::Team));
        assert!(!set.allows(EntityKind::Club));
        assert_eq!(set.scoped_entities().count(), 2);
    }

    #[test]
    fn zero_grants_is_an_ordinary_user() {
        let set = PermissionSet::from_grants(vec![]);
        assert!(!set.is_global_admin());
        for kind in EntityKind::ALL {
            assert!(!set.allows(kind));
        }
    }

    #[test]
    fn normalization_is_deterministic() {
        let user = UserId::new();
        let grants = vec![
            Grant::scoped(user, EntityKind::Referee),
            Grant::scoped(user, EntityKind::Club),
        ];
        let a = PermissionSet::from_grants(grants.clone());
        let b = PermissionSet::from_grants(grants);
        assert_eq!(a, b);
    }
}
