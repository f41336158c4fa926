//! Common types used across the authorization core.
//!
//! ## Domain Types
//!
//! - [`IdentityClaim`] / [`Role`] - the authenticated actor
//! - [`AccessGrant`] / [`AccessLevel`] - patient-delegated access grants
//! - [`GrantDraft`] / [`GrantUpdate`] - unvalidated wire shapes for grant
//!   writes, normalized into [`GrantAttributes`]

pub mod claim;
pub mod grant;

pub use claim::{IdentityClaim, Role};
pub use grant::{
    AccessGrant, AccessLevel, GrantAttributes, GrantDraft, GrantUpdate, ValidationError,
};
