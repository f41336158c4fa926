//! Grant lifecycle manager.
//!
//! Every grant write goes through this service: it enforces who may manage
//! a patient's grants (an administrator or the patient themself), validates
//! drafts, checks that the referenced patient and grantee exist, and only
//! then touches the store. A draft that fails any step leaves the stored
//! grant unchanged.

use std::sync::Arc;

use clinrec_core::{GrantId, PatientId};

use crate::AuthzResult;
use crate::error::AuthzError;
use crate::storage::{GrantStorage, SubjectDirectory};
use crate::types::{AccessGrant, GrantDraft, GrantUpdate, IdentityClaim, Role};

// =============================================================================
// Grant Manager
// =============================================================================

/// Service for creating, updating, and deleting access grants.
pub struct GrantManager {
    /// Grant persistence.
    grants: Arc<dyn GrantStorage>,

    /// Existence lookups for patients and users.
    directory: Arc<dyn SubjectDirectory>,
}

impl GrantManager {
    /// Create a new grant manager.
    #[must_use]
    pub fn new(grants: Arc<dyn GrantStorage>, directory: Arc<dyn SubjectDirectory>) -> Self {
        Self { grants, directory }
    }

    /// Create a grant from a draft.
    ///
    /// The actor must be an administrator or the patient whose record is
    /// being delegated. The draft is validated and both referenced
    /// entities must exist.
    ///
    /// # Errors
    ///
    /// - `AuthzError::Forbidden` if the actor may not manage this
    ///   patient's grants
    /// - `AuthzError::Validation` if the draft violates the level or
    ///   date-window invariants
    /// - `AuthzError::Conflict` if the patient or grantee does not exist
    /// - `AuthzError::Store` if a storage operation fails
    pub async fn create(
        &self,
        claim: &IdentityClaim,
        draft: &GrantDraft,
    ) -> AuthzResult<AccessGrant> {
        ensure_can_manage(claim, PatientId::new(draft.patient_id))?;

        let attributes = draft.validate()?;

        if !self.directory.patient_exists(attributes.patient).await? {
            return Err(AuthzError::conflict(format!(
                "patient {} does not exist",
                attributes.patient
            )));
        }
        if !self.directory.user_exists(attributes.grantee).await? {
            return Err(AuthzError::conflict(format!(
                "grantee {} does not exist",
                attributes.grantee
            )));
        }

        let grant = self.grants.create(&attributes).await?;
        tracing::info!(
            actor = %claim,
            grant = %grant.id,
            patient = %grant.patient,
            grantee = %grant.grantee,
            level = %grant.level,
            "Access grant created"
        );
        Ok(grant)
    }

    /// Replace a grant's level and validity window.
    ///
    /// The covered patient and the grantee are immutable; the stored grant
    /// is replaced atomically and stays unchanged if validation fails.
    ///
    /// # Errors
    ///
    /// - `AuthzError::NotFound` if the grant does not exist
    /// - `AuthzError::Forbidden` if the actor may not manage this
    ///   patient's grants
    /// - `AuthzError::Validation` if the update violates the invariants
    /// - `AuthzError::Store` if a storage operation fails
    pub async fn update(
        &self,
        claim: &IdentityClaim,
        id: GrantId,
        update: &GrantUpdate,
    ) -> AuthzResult<AccessGrant> {
        let current = self.require(id).await?;
        ensure_can_manage(claim, current.patient)?;

        let attributes = update.validate_for(&current)?;

        let grant = self.grants.update(id, &attributes).await?;
        tracing::info!(
            actor = %claim,
            grant = %grant.id,
            level = %grant.level,
            "Access grant updated"
        );
        Ok(grant)
    }

    /// Delete a grant. Unconditional; there is no soft delete.
    ///
    /// # Errors
    ///
    /// - `AuthzError::NotFound` if the grant does not exist
    /// - `AuthzError::Forbidden` if the actor may not manage this
    ///   patient's grants
    /// - `AuthzError::Store` if a storage operation fails
    pub async fn delete(&self, claim: &IdentityClaim, id: GrantId) -> AuthzResult<()> {
        let current = self.require(id).await?;
        ensure_can_manage(claim, current.patient)?;

        self.grants.delete(id).await?;
        tracing::info!(actor = %claim, grant = %id, "Access grant deleted");
        Ok(())
    }

    /// List every grant covering a patient's record.
    ///
    /// # Errors
    ///
    /// - `AuthzError::Forbidden` if the actor may not manage this
    ///   patient's grants
    /// - `AuthzError::Store` if a storage operation fails
    pub async fn list_for_patient(
        &self,
        claim: &IdentityClaim,
        patient: PatientId,
    ) -> AuthzResult<Vec<AccessGrant>> {
        ensure_can_manage(claim, patient)?;
        self.grants.list_for_patient(patient).await
    }

    async fn require(&self, id: GrantId) -> AuthzResult<AccessGrant> {
        self.grants
            .get(id)
            .await?
            .ok_or_else(|| AuthzError::not_found(format!("grant {id} does not exist")))
    }
}

/// Only an administrator or the owning patient may manage a patient's
/// grants. Doctors do not manage delegation.
fn ensure_can_manage(claim: &IdentityClaim, patient: PatientId) -> AuthzResult<()> {
    match claim.role {
        Role::Admin => Ok(()),
        Role::Patient if claim.owns(patient) => Ok(()),
        _ => {
            tracing::debug!(
                actor = %claim,
                patient = %patient,
                "Grant management denied"
            );
            Err(AuthzError::forbidden(format!(
                "only an administrator or patient {patient} may manage these grants"
            )))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
