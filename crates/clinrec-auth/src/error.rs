//! Authorization error types.
//!
//! This module defines all error types that can occur while authenticating
//! a request or deciding access. The overriding policy is fail-closed:
//! no error in this taxonomy ever resolves to an allow.

use crate::types::ValidationError;

/// Errors that can occur during authentication and authorization.
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// The request carries no usable credential.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Description of what was missing.
        message: String,
    },

    /// The bearer credential failed verification (expired, malformed,
    /// bad signature).
    #[error("Invalid token: {message}")]
    InvalidToken {
        /// Description of why the token is invalid.
        message: String,
    },

    /// The verified credential produced a garbled identity claim.
    #[error("Invalid claim: {message}")]
    InvalidClaim {
        /// Description of why the claim is invalid.
        message: String,
    },

    /// The authenticated actor is not permitted to perform the action.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Description of why access is forbidden.
        message: String,
    },

    /// The resource reference is malformed (e.g. missing its owning
    /// patient id).
    #[error("Invalid resource: {message}")]
    InvalidResource {
        /// Description of why the reference is invalid.
        message: String,
    },

    /// A grant draft violated the level or date-window invariants.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A referential-integrity violation: the operation references records
    /// that do not exist, or would orphan records that do.
    #[error("Conflict: {message}")]
    Conflict {
        /// Description of the conflicting references.
        message: String,
    },

    /// The referenced grant does not exist.
    #[error("Not found: {message}")]
    NotFound {
        /// Description of what was not found.
        message: String,
    },

    /// The grant store could not be reached. Decisions fail closed on this.
    #[error("Store unavailable: {message}")]
    Store {
        /// Description of the store failure.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthzError {
    /// Creates a new `Unauthorized` error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidToken` error.
    #[must_use]
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidClaim` error.
    #[must_use]
    pub fn invalid_claim(message: impl Into<String>) -> Self {
        Self::InvalidClaim {
            message: message.into(),
        }
    }

    /// Creates a new `Forbidden` error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidResource` error.
    #[must_use]
    pub fn invalid_resource(message: impl Into<String>) -> Self {
        Self::InvalidResource {
            message: message.into(),
        }
    }

    /// Creates a new `Conflict` error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a new `Store` error.
    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable snake_case code for response bodies and logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } | Self::InvalidToken { .. } | Self::InvalidClaim { .. } => {
                "token_invalid"
            }
            Self::Forbidden { .. } => "forbidden",
            Self::InvalidResource { .. } => "invalid_resource",
            Self::Validation(_) => "validation_failed",
            Self::Conflict { .. } => "conflict",
            Self::NotFound { .. } => "not_found",
            Self::Store { .. } => "store_unavailable",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !self.is_server_error()
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Store { .. } | Self::Internal { .. })
    }

    /// Returns `true` if this is an authentication error ("not logged in").
    #[must_use]
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::InvalidToken { .. } | Self::InvalidClaim { .. }
        )
    }

    /// Returns `true` if this is an authorization error ("logged in, not
    /// permitted").
    #[must_use]
    pub fn is_authorization_error(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthzError::unauthorized("missing bearer credential");
        assert_eq!(err.to_string(), "Unauthorized: missing bearer credential");

        let err = AuthzError::forbidden("staff access required");
        assert_eq!(err.to_string(), "Forbidden: staff access required");

        let err = AuthzError::store("connection refused");
        assert_eq!(err.to_string(), "Store unavailable: connection refused");
    }

    #[test]
    fn test_error_predicates() {
        let err = AuthzError::unauthorized("no credential");
        assert!(err.is_authentication_error());
        assert!(!err.is_authorization_error());
        assert!(err.is_client_error());

        let err = AuthzError::forbidden("no access");
        assert!(!err.is_authentication_error());
        assert!(err.is_authorization_error());

        let err = AuthzError::store("down");
        assert!(err.is_server_error());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthzError::unauthorized("x").code(), "token_invalid");
        assert_eq!(AuthzError::invalid_token("x").code(), "token_invalid");
        assert_eq!(AuthzError::invalid_claim("x").code(), "token_invalid");
        assert_eq!(AuthzError::forbidden("x").code(), "forbidden");
        assert_eq!(AuthzError::conflict("x").code(), "conflict");
        assert_eq!(AuthzError::store("x").code(), "store_unavailable");
    }

    #[test]
    fn test_validation_error_conversion() {
        let validation = ValidationError::InvalidLevel {
            value: "admin".to_string(),
        };
        let err = AuthzError::from(validation);
        assert_eq!(err.code(), "validation_failed");
        assert!(err.is_client_error());
    }
}
