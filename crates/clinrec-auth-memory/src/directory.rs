//! In-memory subject directory.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use clinrec_auth::AuthzResult;
use clinrec_auth::storage::SubjectDirectory;
use clinrec_core::{PatientId, UserId};

/// In-memory existence lookups for patients and user accounts.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    patients: RwLock<HashSet<PatientId>>,
    users: RwLock<HashSet<UserId>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a patient record.
    pub async fn register_patient(&self, patient: PatientId) {
        self.patients.write().await.insert(patient);
    }

    /// Registers a user account.
    pub async fn register_user(&self, user: UserId) {
        self.users.write().await.insert(user);
    }
}

#[async_trait]
impl SubjectDirectory for InMemoryDirectory {
    async fn patient_exists(&self, patient: PatientId) -> AuthzResult<bool> {
        Ok(self.patients.read().await.contains(&patient))
    }

    async fn user_exists(&self, user: UserId) -> AuthzResult<bool> {
        Ok(self.users.read().await.contains(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_directory_knows_nobody() {
        let directory = InMemoryDirectory::new();
        assert!(!directory.patient_exists(PatientId::new(7)).await.unwrap());
        assert!(!directory.user_exists(UserId::new(12)).await.unwrap());
    }

    #[tokio::test]
    async fn test_registration() {
        let directory = InMemoryDirectory::new();
        directory.register_patient(PatientId::new(7)).await;
        directory.register_user(UserId::new(12)).await;

        assert!(directory.patient_exists(PatientId::new(7)).await.unwrap());
        assert!(directory.user_exists(UserId::new(12)).await.unwrap());
        assert!(!directory.patient_exists(PatientId::new(8)).await.unwrap());
    }
}
