//! HTTP middleware for the authorization gate.
//!
//! This module provides the axum adapters that sit between the HTTP layer
//! and the decision core:
//!
//! - Bearer credential extraction and verification ([`ClaimAuth`])
//! - Role-only short-circuit for staff endpoints ([`StaffAuth`])
//! - JSON error responses distinguishing authentication from authorization
//!   failures
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use clinrec_auth::middleware::{ClaimAuth, GateState};
//!
//! async fn protected_handler(ClaimAuth(claim): ClaimAuth) -> String {
//!     format!("Hello, {}!", claim.subject)
//! }
//!
//! let app = Router::new()
//!     .route("/protected", get(protected_handler))
//!     .with_state(gate_state);
//! ```
//!
//! The gate only authenticates; resource-scoped handlers must still consult
//! the [`DecisionEngine`](crate::decision::DecisionEngine) per request.

pub mod auth;
pub mod error;
pub mod staff;

pub use auth::{ClaimAuth, GateState, TokenVerifier};
pub use staff::StaffAuth;
