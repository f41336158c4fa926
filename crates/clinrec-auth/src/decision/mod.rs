//! The access decision engine.
//!
//! Combines an identity claim, a target resource, and the requested
//! operation into a single ALLOW/DENY decision with a reason:
//!
//! ```ignore
//! use clinrec_auth::decision::DecisionEngine;
//!
//! let engine = DecisionEngine::new(grant_store, clock);
//! let decision = engine.decide(&claim, &resource, Operation::Read).await;
//! if decision.is_allowed() {
//!     // Proceed with the request
//! }
//! ```
//!
//! Role rules are evaluated first (admin, doctor, patient self-access);
//! only when none apply does the engine consult the grant store for a
//! delegated, time-bounded grant.

pub mod engine;

pub use engine::{AccessDecision, AllowReason, DecisionEngine, DenyCode, DenyReason};
