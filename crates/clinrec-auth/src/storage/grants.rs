//! Grant storage trait.
//!
//! Defines the interface for access-grant persistence. Implementations are
//! provided by storage backends; this core only requires that individual
//! reads and writes are atomic — a grant is never observable with its level
//! updated but its window not.

use async_trait::async_trait;

use clinrec_core::{GrantId, PatientId, UserId};

use crate::AuthzResult;
use crate::types::{AccessGrant, GrantAttributes};

// =============================================================================
// Grant Storage Trait
// =============================================================================

/// Storage operations for access grants.
///
/// # Example
///
/// ```ignore
/// use clinrec_auth::storage::GrantStorage;
///
/// async fn example(storage: &impl GrantStorage) -> clinrec_auth::AuthzResult<()> {
///     let grants = storage
///         .find_for_grantee(UserId::new(12), PatientId::new(7))
///         .await?;
///     println!("{} candidate grants", grants.len());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait GrantStorage: Send + Sync {
    /// Fetch a grant by id.
    ///
    /// Returns `None` if no grant with that id exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::Store` if the store cannot be reached.
    async fn get(&self, id: GrantId) -> AuthzResult<Option<AccessGrant>>;

    /// Fetch every grant delegating `patient`'s record to `grantee`,
    /// regardless of validity window.
    ///
    /// The decision engine filters for activity itself; implementations
    /// must not pre-filter by date.
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::Store` if the store cannot be reached.
    async fn find_for_grantee(
        &self,
        grantee: UserId,
        patient: PatientId,
    ) -> AuthzResult<Vec<AccessGrant>>;

    /// Fetch every grant covering `patient`'s record.
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::Store` if the store cannot be reached.
    async fn list_for_patient(&self, patient: PatientId) -> AuthzResult<Vec<AccessGrant>>;

    /// Persist a new grant, assigning its id.
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::Store` if the store cannot be reached.
    async fn create(&self, attributes: &GrantAttributes) -> AuthzResult<AccessGrant>;

    /// Replace the stored grant atomically.
    ///
    /// There is no partial-update path: the whole attribute set is written
    /// in one step, so no reader ever observes a half-updated grant.
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::NotFound` if the grant does not exist, or
    /// `AuthzError::Store` if the store cannot be reached.
    async fn update(&self, id: GrantId, attributes: &GrantAttributes) -> AuthzResult<AccessGrant>;

    /// Delete a grant unconditionally. No soft-delete or grace period.
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::NotFound` if the grant does not exist, or
    /// `AuthzError::Store` if the store cannot be reached.
    async fn delete(&self, id: GrantId) -> AuthzResult<()>;
}
