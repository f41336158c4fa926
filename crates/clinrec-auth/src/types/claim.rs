//! The authenticated identity attached to a request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use clinrec_core::{PatientId, UserId};

use crate::error::AuthzError;

// =============================================================================
// Role
// =============================================================================

/// The role carried by an account, fixed for the lifetime of a session.
///
/// Roles are a closed set; free-form role strings are rejected at the
/// boundary and never flow into decision logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access to every resource.
    Admin,
    /// Clinical staff; read/write access to all patient-scoped resources.
    Doctor,
    /// A patient; access to their own record plus whatever has been
    /// delegated to them.
    Patient,
}

impl Role {
    /// Canonical snake_case name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Patient => "patient",
        }
    }

    /// Whether this role is clinical or administrative staff.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Doctor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "doctor" => Ok(Self::Doctor),
            "patient" => Ok(Self::Patient),
            other => Err(AuthzError::invalid_claim(format!(
                "unknown role '{other}'"
            ))),
        }
    }
}

// =============================================================================
// Identity Claim
// =============================================================================

/// The authenticated actor's identity, produced by the external token
/// verifier on each request.
///
/// Immutable once built; discarded at request end. This core never
/// persists claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    /// The authenticated user's identifier.
    pub subject: UserId,

    /// The role attached to the account.
    pub role: Role,
}

impl IdentityClaim {
    /// Builds a claim for the given subject and role.
    #[must_use]
    pub const fn new(subject: UserId, role: Role) -> Self {
        Self { subject, role }
    }

    /// Whether this claim is a patient acting on their own record.
    ///
    /// Patient accounts and patient records share the identifier space, so
    /// ownership is a direct key comparison.
    #[must_use]
    pub fn owns(&self, patient: PatientId) -> bool {
        self.role == Role::Patient && self.subject.value() == patient.value()
    }
}

impl fmt::Display for IdentityClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.role, self.subject)
    }
}
