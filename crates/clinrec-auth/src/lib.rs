//! # clinrec-auth
//!
//! Authorization core for the Clinrec clinical records server.
//!
//! This crate provides:
//! - Identity claims and the closed role set (admin / doctor / patient)
//! - Patient-delegated, time-bounded access grants
//! - The access decision engine (role rules, self-access, grant lookup)
//! - Grant lifecycle management with validation and actor rules
//! - Axum middleware adapters for the HTTP layer
//! - Storage traits for the external grant store and subject directory
//!
//! ## Overview
//!
//! Every request to a patient-scoped resource resolves to one ALLOW/DENY
//! decision over the triple (actor, resource, operation). Role rules are
//! checked first; delegated grants are the fallback path for patients
//! acting on records that are not their own. All failure modes — garbled
//! claims, malformed references, an unreachable grant store — resolve to
//! a denial, never to an allow.
//!
//! ## Modules
//!
//! - [`config`] - Authorization gate configuration
//! - [`decision`] - The access decision engine
//! - [`error`] - The authorization error taxonomy
//! - [`grants`] - Grant lifecycle management
//! - [`middleware`] - Axum middleware for the HTTP boundary
//! - [`storage`] - Storage traits for external collaborators
//! - [`types`] - Claims, roles, grants, and their wire drafts

pub mod config;
pub mod decision;
pub mod error;
pub mod grants;
pub mod middleware;
pub mod storage;
pub mod types;

pub use config::{AuthzConfig, CookieConfig};
pub use decision::{AccessDecision, AllowReason, DecisionEngine, DenyCode, DenyReason};
pub use error::AuthzError;
pub use grants::GrantManager;
pub use middleware::{ClaimAuth, GateState, StaffAuth, TokenVerifier};
pub use storage::{GrantStorage, SubjectDirectory};
pub use types::{
    AccessGrant, AccessLevel, GrantAttributes, GrantDraft, GrantUpdate, IdentityClaim, Role,
    ValidationError,
};

/// Type alias for authorization results.
pub type AuthzResult<T> = Result<T, AuthzError>;
