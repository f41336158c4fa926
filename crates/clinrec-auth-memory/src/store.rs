//! In-memory grant store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use clinrec_auth::storage::GrantStorage;
use clinrec_auth::types::{AccessGrant, GrantAttributes};
use clinrec_auth::{AuthzError, AuthzResult};
use clinrec_core::{GrantId, PatientId, UserId};

/// In-memory grant storage.
///
/// Grants live in a `RwLock`-guarded map keyed by id; ids are assigned
/// from an atomic counter. Updates replace the whole record under the
/// write lock, so readers never see a grant with its level changed but
/// its window not.
#[derive(Debug)]
pub struct InMemoryGrantStore {
    grants: RwLock<HashMap<GrantId, AccessGrant>>,
    next_id: AtomicI64,
}

impl InMemoryGrantStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grants: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored grants.
    pub async fn len(&self) -> usize {
        self.grants.read().await.len()
    }

    /// Whether the store holds no grants.
    pub async fn is_empty(&self) -> bool {
        self.grants.read().await.is_empty()
    }
}

#[async_trait]
impl GrantStorage for InMemoryGrantStore {
    async fn get(&self, id: GrantId) -> AuthzResult<Option<AccessGrant>> {
        Ok(self.grants.read().await.get(&id).copied())
    }

    async fn find_for_grantee(
        &self,
        grantee: UserId,
        patient: PatientId,
    ) -> AuthzResult<Vec<AccessGrant>> {
        let grants = self.grants.read().await;
        let mut matching: Vec<AccessGrant> = grants
            .values()
            .filter(|g| g.grantee == grantee && g.patient == patient)
            .copied()
            .collect();
        matching.sort_by_key(|g| g.id);
        Ok(matching)
    }

    async fn list_for_patient(&self, patient: PatientId) -> AuthzResult<Vec<AccessGrant>> {
        let grants = self.grants.read().await;
        let mut matching: Vec<AccessGrant> = grants
            .values()
            .filter(|g| g.patient == patient)
            .copied()
            .collect();
        matching.sort_by_key(|g| g.id);
        Ok(matching)
    }

    async fn create(&self, attributes: &GrantAttributes) -> AuthzResult<AccessGrant> {
        let id = GrantId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let grant = attributes.with_id(id);
        self.grants.write().await.insert(id, grant);
        Ok(grant)
    }

    async fn update(&self, id: GrantId, attributes: &GrantAttributes) -> AuthzResult<AccessGrant> {
        let mut grants = self.grants.write().await;
        if !grants.contains_key(&id) {
            return Err(AuthzError::not_found(format!("grant {id} does not exist")));
        }
        let grant = attributes.with_id(id);
        grants.insert(id, grant);
        Ok(grant)
    }

    async fn delete(&self, id: GrantId) -> AuthzResult<()> {
        match self.grants.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AuthzError::not_found(format!("grant {id} does not exist"))),
        }
    }
}
