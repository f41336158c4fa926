//! Error response handling for the authorization gate.
//!
//! This module implements `IntoResponse` for `AuthzError` so extractors and
//! handlers can reject requests with a structured JSON body. Authentication
//! failures (401, missing credential) are kept distinct from authorization
//! failures (403, insufficient access).

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AuthzError;

/// Realm reported in `WWW-Authenticate` challenges.
const REALM: &str = "clinrec";

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for AuthzError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let code = self.code();

        let body = json!({
            "error": code,
            "message": self.to_string(),
        });

        let mut headers = HeaderMap::new();

        // Challenge the client on missing credentials only.
        if status == StatusCode::UNAUTHORIZED {
            let www_auth = build_www_authenticate_header(code, &self.to_string());
            if let Ok(value) = HeaderValue::from_str(&www_auth) {
                headers.insert(header::WWW_AUTHENTICATE, value);
            }
        }

        (status, headers, Json(body)).into_response()
    }
}

/// HTTP status for an `AuthzError`.
fn status_for(error: &AuthzError) -> StatusCode {
    match error {
        AuthzError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AuthzError::InvalidToken { .. }
        | AuthzError::InvalidClaim { .. }
        | AuthzError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AuthzError::InvalidResource { .. } | AuthzError::Validation(_) => StatusCode::BAD_REQUEST,
        AuthzError::NotFound { .. } => StatusCode::NOT_FOUND,
        AuthzError::Conflict { .. } => StatusCode::CONFLICT,
        AuthzError::Store { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AuthzError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the `WWW-Authenticate` header value for 401 responses.
///
/// Format: `Bearer realm="clinrec", error="...", error_description="..."`
fn build_www_authenticate_header(error: &str, description: &str) -> String {
    let escaped_desc = description.replace('\"', "\\\"");
    format!(
        "Bearer realm=\"{REALM}\", error=\"{error}\", error_description=\"{escaped_desc}\""
    )
}

// =============================================================================
// Tests
// =============================================================================
