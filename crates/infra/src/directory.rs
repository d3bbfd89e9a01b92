//! In-memory identity directory (dev/test).

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use leaguehub_auth::{DirectoryError, Identity, IdentityDirectory};

/// Identity directory held in process memory, keyed by lowercased email.
///
/// `insert` is the stand-in for the external provisioning tooling that owns
/// identity records in a real deployment.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    by_email: RwLock<HashMap<String, Identity>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, identity: Identity) {
        self.by_email
            .write()
            .expect("directory lock poisoned")
            .insert(identity.email.to_lowercase(), identity);
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DirectoryError> {
        Ok(self
            .by_email
            .read()
            .map_err(|_| DirectoryError::Unavailable("directory lock poisoned".into()))?
            .get(&email.to_lowercase())
            .cloned())
    }
}
