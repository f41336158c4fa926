//! Subject directory trait.
//!
//! Grant writes must reference an existing patient and an existing user;
//! the lookup itself belongs to the records store, not to this core. The
//! trait keeps that dependency explicit and mockable.

use async_trait::async_trait;

use clinrec_core::{PatientId, UserId};

use crate::AuthzResult;

// =============================================================================
// Subject Directory Trait
// =============================================================================

/// Existence lookups for patients and user accounts.
#[async_trait]
pub trait SubjectDirectory: Send + Sync {
    /// Whether a patient record with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::Store` if the directory cannot be reached.
    async fn patient_exists(&self, patient: PatientId) -> AuthzResult<bool>;

    /// Whether a user account with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::Store` if the directory cannot be reached.
    async fn user_exists(&self, user: UserId) -> AuthzResult<bool>;
}
