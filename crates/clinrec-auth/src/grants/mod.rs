//! Grant lifecycle management.
//!
//! Draft validation lives on the wire types themselves
//! ([`GrantDraft::validate`](crate::types::GrantDraft::validate),
//! [`GrantUpdate::validate_for`](crate::types::GrantUpdate::validate_for));
//! this module provides the [`GrantManager`] service that applies the actor
//! rules for grant writes and drives the store.

pub mod manager;

pub use manager::GrantManager;
