//! Storage traits for the external collaborators of the authorization core.
//!
//! This module defines the interfaces for:
//!
//! - Access-grant persistence ([`GrantStorage`])
//! - Entity existence lookups ([`SubjectDirectory`])
//!
//! # Implementations
//!
//! Storage implementations live in separate crates:
//!
//! - `clinrec-auth-memory` - in-memory backend for tests and embedding

pub mod directory;
pub mod grants;

pub use directory::SubjectDirectory;
pub use grants::GrantStorage;
