use thiserror::Error;

/// Core error types for Clinrec domain operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),

    #[error("Invalid resource kind: {0}")]
    InvalidResourceKind(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid resource reference: {message}")]
    InvalidResource { message: String },

    #[error("Record not found: {kind}/{id}")]
    NotFound { kind: String, id: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Time parsing error: {0}")]
    TimeError(#[from] time::error::Parse),
}

impl CoreError {
    /// Create a new InvalidId error
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }

    /// Create a new InvalidDate error
    pub fn invalid_date(date: impl Into<String>) -> Self {
        Self::InvalidDate(date.into())
    }

    /// Create a new InvalidResource error
    pub fn invalid_resource(message: impl Into<String>) -> Self {
        Self::InvalidResource {
            message: message.into(),
        }
    }

    /// Create a new NotFound error
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Create a new Conflict error (referential-integrity violations, e.g.
    /// deleting a patient with dependent appointments)
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Check if this error is a client error (4xx category)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidId(_)
                | Self::InvalidDate(_)
                | Self::InvalidResourceKind(_)
                | Self::InvalidOperation(_)
                | Self::InvalidResource { .. }
                | Self::NotFound { .. }
                | Self::Conflict { .. }
                | Self::JsonError(_)
        )
    }

    /// Check if this error is a server error (5xx category)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::TimeError(_))
    }
}
