//! # clinrec-core
//!
//! Core domain types shared across the Clinrec clinical records server.
//!
//! This crate defines the vocabulary the rest of the workspace speaks:
//!
//! - Typed identifiers for patients, users, and access grants
//! - Day-granularity calendar dates and the clock abstraction
//! - Resource references and the read/write operation kinds
//! - The core error taxonomy

pub mod error;
pub mod id;
pub mod resource;
pub mod time;

pub use error::CoreError;
pub use id::{GrantId, PatientId, UserId};
pub use resource::{Operation, ResourceKind, ResourceRef};
pub use time::{CalendarDate, Clock, FixedClock, SystemClock};

/// Type alias for core operation results.
pub type Result<T> = std::result::Result<T, CoreError>;
