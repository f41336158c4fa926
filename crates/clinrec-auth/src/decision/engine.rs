//! Decision engine for access control.
//!
//! This module provides the core decision logic that combines role rules,
//! patient self-access, and delegated grants into one ALLOW/DENY outcome.

use std::sync::Arc;

use serde::Serialize;

use clinrec_core::{CalendarDate, Clock, Operation, ResourceRef};

use crate::AuthzError;
use crate::storage::GrantStorage;
use crate::types::{IdentityClaim, Role};

// =============================================================================
// Access Decision
// =============================================================================

/// Result of an access decision.
#[derive(Debug, Clone)]
pub enum AccessDecision {
    /// Access is granted.
    Allow(AllowReason),
    /// Access is denied with a reason.
    Deny(DenyReason),
}

impl AccessDecision {
    /// Returns `true` if access was granted.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    /// Returns `true` if access was denied.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny(_))
    }

    /// Get the allow reason if access was granted.
    #[must_use]
    pub fn allow_reason(&self) -> Option<AllowReason> {
        match self {
            Self::Allow(reason) => Some(*reason),
            Self::Deny(_) => None,
        }
    }

    /// Get the deny reason if access was denied.
    #[must_use]
    pub fn deny_reason(&self) -> Option<&DenyReason> {
        match self {
            Self::Allow(_) => None,
            Self::Deny(reason) => Some(reason),
        }
    }

    /// Converts the decision into a `Result`, so route handlers can `?` a
    /// denial straight into the shared error type.
    ///
    /// # Errors
    ///
    /// A store-failure denial becomes `AuthzError::Store`; every other
    /// denial becomes `AuthzError::Forbidden` (an authorization failure,
    /// distinct from "not logged in").
    pub fn into_result(self) -> Result<AllowReason, AuthzError> {
        match self {
            Self::Allow(reason) => Ok(reason),
            Self::Deny(reason) => match reason.code {
                DenyCode::StoreUnavailable => Err(AuthzError::store(reason.message)),
                _ => Err(AuthzError::forbidden(reason.message)),
            },
        }
    }
}

/// Why access was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowReason {
    /// The actor's role grants blanket access (admin, doctor).
    RolePrivileged,
    /// A patient acting on their own record.
    OwnerSelfAccess,
    /// A delegated grant covers the operation at the reference date.
    ActiveGrant,
}

// =============================================================================
// Deny Reason
// =============================================================================

/// Machine-readable denial codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyCode {
    /// Grants exist for this (patient, grantee) pair, but none is active
    /// at the reference date with a sufficient level.
    NoGrant,
    /// The actor has no role-based path and no grants apply at all.
    RoleInsufficient,
    /// The credential was missing or failed verification.
    TokenInvalid,
    /// The grant store could not be consulted; the decision fails closed.
    StoreUnavailable,
}

/// Reason for an access denial.
#[derive(Debug, Clone, Serialize)]
pub struct DenyReason {
    /// Code for programmatic handling.
    pub code: DenyCode,

    /// Human-readable message.
    pub message: String,
}

impl DenyReason {
    /// Grants exist but none covers the operation at the reference date.
    #[must_use]
    pub fn no_grant(operation: Operation, resource: &ResourceRef) -> Self {
        Self {
            code: DenyCode::NoGrant,
            message: format!("no active grant covers {operation} on {resource}"),
        }
    }

    /// No role rule applies and no grants exist for the pair.
    #[must_use]
    pub fn role_insufficient(resource: &ResourceRef) -> Self {
        Self {
            code: DenyCode::RoleInsufficient,
            message: format!("role does not permit access to {resource} and no grants apply"),
        }
    }

    /// The credential was missing or failed verification.
    #[must_use]
    pub fn token_invalid(message: impl Into<String>) -> Self {
        Self {
            code: DenyCode::TokenInvalid,
            message: message.into(),
        }
    }

    /// The grant store was unreachable.
    #[must_use]
    pub fn store_unavailable() -> Self {
        Self {
            code: DenyCode::StoreUnavailable,
            message: "grant store unavailable, denying access".to_string(),
        }
    }
}

// =============================================================================
// Decision Engine
// =============================================================================

/// Access decision engine.
///
/// Stateless over its inputs: the same claim, resource, operation, and
/// reference date always produce the same decision. The grant store and
/// clock are injected so decisions are deterministic under test.
pub struct DecisionEngine {
    /// Store of delegated access grants.
    grants: Arc<dyn GrantStorage>,

    /// Source of the reference time.
    clock: Arc<dyn Clock>,
}

impl DecisionEngine {
    /// Create a new decision engine.
    #[must_use]
    pub fn new(grants: Arc<dyn GrantStorage>, clock: Arc<dyn Clock>) -> Self {
        Self { grants, clock }
    }

    /// Decide access at the injected clock's current date.
    pub async fn decide(
        &self,
        claim: &IdentityClaim,
        resource: &ResourceRef,
        operation: Operation,
    ) -> AccessDecision {
        self.decide_at(claim, resource, operation, self.clock.today())
            .await
    }

    /// Decide access at an explicit reference date.
    ///
    /// # Evaluation Order
    ///
    /// First match wins:
    ///
    /// 1. Admins bypass grant checks entirely.
    /// 2. Doctors have blanket read/write on all patient-scoped resources.
    /// 3. A patient reads their own record freely and writes the kinds
    ///    that permit self-editing.
    /// 4. Otherwise the grant store is consulted: among grants active at
    ///    the reference date, the highest level must cover the operation.
    pub async fn decide_at(
        &self,
        claim: &IdentityClaim,
        resource: &ResourceRef,
        operation: Operation,
        on: CalendarDate,
    ) -> AccessDecision {
        match claim.role {
            Role::Admin | Role::Doctor => {
                tracing::debug!(
                    actor = %claim,
                    resource = %resource,
                    operation = %operation,
                    "Role grants blanket access"
                );
                AccessDecision::Allow(AllowReason::RolePrivileged)
            }
            Role::Patient
                if claim.owns(resource.patient)
                    && (operation == Operation::Read || resource.kind.patient_editable()) =>
            {
                tracing::debug!(
                    actor = %claim,
                    resource = %resource,
                    operation = %operation,
                    "Owner self-access"
                );
                AccessDecision::Allow(AllowReason::OwnerSelfAccess)
            }
            Role::Patient => self.decide_from_grants(claim, resource, operation, on).await,
        }
    }

    /// Consult the grant store for a delegated path.
    async fn decide_from_grants(
        &self,
        claim: &IdentityClaim,
        resource: &ResourceRef,
        operation: Operation,
        on: CalendarDate,
    ) -> AccessDecision {
        let candidates = match self
            .grants
            .find_for_grantee(claim.subject, resource.patient)
            .await
        {
            Ok(grants) => grants,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    actor = %claim,
                    resource = %resource,
                    "Grant lookup failed, failing closed"
                );
                return AccessDecision::Deny(DenyReason::store_unavailable());
            }
        };

        if candidates.is_empty() {
            tracing::debug!(
                actor = %claim,
                resource = %resource,
                "No grants apply"
            );
            return AccessDecision::Deny(DenyReason::role_insufficient(resource));
        }

        // Overlapping grants: the highest active level wins.
        let best_active = candidates
            .iter()
            .filter(|grant| grant.is_active(on))
            .map(|grant| grant.level)
            .max();

        match best_active {
            Some(level) if level.covers(operation) => {
                tracing::debug!(
                    actor = %claim,
                    resource = %resource,
                    operation = %operation,
                    level = %level,
                    reference_date = %on,
                    "Active grant covers operation"
                );
                AccessDecision::Allow(AllowReason::ActiveGrant)
            }
            _ => {
                tracing::debug!(
                    actor = %claim,
                    resource = %resource,
                    operation = %operation,
                    reference_date = %on,
                    candidates = candidates.len(),
                    "No active grant covers operation"
                );
                AccessDecision::Deny(DenyReason::no_grant(operation, resource))
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
