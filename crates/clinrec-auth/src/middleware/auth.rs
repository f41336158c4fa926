//! Bearer credential extractor.
//!
//! This module provides the axum extractor that turns an inbound request
//! into a verified [`IdentityClaim`]. Verification itself is delegated to
//! an external [`TokenVerifier`]; this gate only locates the credential and
//! maps failures.
//!
//! A missing credential is an authentication failure (401); a credential
//! that fails verification is rejected as forbidden (403). Neither ever
//! falls through as an anonymous allow.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, header::COOKIE, request::Parts},
};

use crate::config::{AuthzConfig, CookieConfig};
use crate::error::AuthzError;
use crate::types::IdentityClaim;

// =============================================================================
// Token Verifier
// =============================================================================

/// External verification of a bearer credential.
///
/// Token cryptography is not this core's concern; implementations wrap
/// whatever verifier the deployment uses and produce an [`IdentityClaim`]
/// or an error.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify the credential and extract the identity claim.
    ///
    /// # Errors
    ///
    /// Returns an error for an expired, malformed, or otherwise invalid
    /// credential. The gate rejects the request; it never degrades to an
    /// anonymous identity.
    async fn verify(&self, token: &str) -> Result<IdentityClaim, AuthzError>;
}

// =============================================================================
// Gate State
// =============================================================================

/// State required by the gate extractors.
///
/// Include this in your application state and make it available to the
/// extractors via `FromRef`.
#[derive(Clone)]
pub struct GateState {
    /// External credential verifier.
    pub verifier: Arc<dyn TokenVerifier>,

    /// Gate configuration.
    pub config: AuthzConfig,
}

impl GateState {
    /// Creates gate state with the default configuration.
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            verifier,
            config: AuthzConfig::default(),
        }
    }

    /// Sets the gate configuration.
    #[must_use]
    pub fn with_config(mut self, config: AuthzConfig) -> Self {
        self.config = config;
        self
    }
}

// =============================================================================
// Claim Extractor
// =============================================================================

/// Axum extractor that authenticates the request and yields the claim.
///
/// This extractor:
/// 1. Reads the `Authorization: Bearer <token>` header
/// 2. Falls back to the configured cookie for browser sessions
/// 3. Delegates verification to the external [`TokenVerifier`]
/// 4. Binds the resulting [`IdentityClaim`] for downstream handlers
///
/// # Errors
///
/// Returns `AuthzError` (which implements `IntoResponse`) if the
/// credential is missing (401) or fails verification (403).
#[derive(Debug)]
pub struct ClaimAuth(pub IdentityClaim);

impl<S> FromRequestParts<S> for ClaimAuth
where
    S: Send + Sync,
    GateState: FromRef<S>,
{
    type Rejection = AuthzError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let gate = GateState::from_ref(state);

        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts, &gate.config.cookie))
            .ok_or_else(|| AuthzError::unauthorized("Missing bearer credential"))?;

        let claim = gate.verifier.verify(&token).await.map_err(|e| {
            tracing::debug!(error = %e, "Credential verification failed");
            match e {
                e @ (AuthzError::InvalidToken { .. } | AuthzError::InvalidClaim { .. }) => e,
                other => AuthzError::invalid_token(other.to_string()),
            }
        })?;

        tracing::debug!(subject = %claim.subject, role = %claim.role, "Credential verified");

        Ok(ClaimAuth(claim))
    }
}

/// Extract the token from the `Authorization` header.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

/// Extract the token from the configured cookie, if the fallback is enabled.
fn cookie_token(parts: &Parts, config: &CookieConfig) -> Option<String> {
    if !config.enabled {
        return None;
    }

    let cookie_header = parts.headers.get(COOKIE)?.to_str().ok()?;

    for cookie in cookie_header.split(';') {
        if let Some((name, value)) = cookie.trim().split_once('=') {
            if name.trim() == config.name {
                let value = value.trim();
                if !value.is_empty() {
                    tracing::debug!(cookie = %config.name, "Credential read from cookie");
                    return Some(value.to_string());
                }
            }
        }
    }

    None
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use axum::http::Request;
    use clinrec_core::UserId;

    struct StaticVerifier;

    #[async_trait]
    impl TokenVerifier for StaticVerifier {
        async fn verify(&self, token: &str) -> Result<IdentityClaim, AuthzError> {
            match token {
                "doctor-token" => Ok(IdentityClaim::new(UserId::new(3), Role::Doctor)),
                "patient-token" => Ok(IdentityClaim::new(UserId::new(7), Role::Patient)),
                "expired-token" => Err(AuthzError::invalid_token("token expired")),
                other => Err(AuthzError::invalid_token(format!("unknown token '{other}'"))),
            }
        }
    }

    fn state() -> GateState {
        GateState::new(Arc::new(StaticVerifier))
    }

    fn parts_for(request: Request<()>) -> Parts {
        request.into_parts().0
    }

    #[tokio::test]
    async fn test_valid_bearer_header() {
        let mut parts = parts_for(
            Request::builder()
                .uri("/patients")
                .header(AUTHORIZATION, "Bearer doctor-token")
                .body(())
                .unwrap(),
        );

        let ClaimAuth(claim) = ClaimAuth::from_request_parts(&mut parts, &state())
            .await
            .unwrap();
        assert_eq!(claim.role, Role::Doctor);
        assert_eq!(claim.subject, UserId::new(3));
    }

    #[tokio::test]
    async fn test_missing_credential_is_unauthorized() {
        let mut parts = parts_for(Request::builder().uri("/patients").body(()).unwrap());

        let err = ClaimAuth::from_request_parts(&mut parts, &state())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_empty_bearer_is_unauthorized() {
        let mut parts = parts_for(
            Request::builder()
                .uri("/patients")
                .header(AUTHORIZATION, "Bearer ")
                .body(())
                .unwrap(),
        );

        let err = ClaimAuth::from_request_parts(&mut parts, &state())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_failed_verification_is_invalid_token() {
        let mut parts = parts_for(
            Request::builder()
                .uri("/patients")
                .header(AUTHORIZATION, "Bearer expired-token")
                .body(())
                .unwrap(),
        );

        let err = ClaimAuth::from_request_parts(&mut parts, &state())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::InvalidToken { .. }));
    }

    #[tokio::test]
    async fn test_cookie_fallback() {
        let mut parts = parts_for(
            Request::builder()
                .uri("/patients")
                .header(COOKIE, "theme=dark; clinrec_token=patient-token")
                .body(())
                .unwrap(),
        );

        let ClaimAuth(claim) = ClaimAuth::from_request_parts(&mut parts, &state())
            .await
            .unwrap();
        assert_eq!(claim.role, Role::Patient);
    }

    #[tokio::test]
    async fn test_cookie_ignored_when_disabled() {
        let mut config = AuthzConfig::default();
        config.cookie.enabled = false;
        let state = state().with_config(config);

        let mut parts = parts_for(
            Request::builder()
                .uri("/patients")
                .header(COOKIE, "clinrec_token=patient-token")
                .body(())
                .unwrap(),
        );

        let err = ClaimAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_header_takes_precedence_over_cookie() {
        let mut parts = parts_for(
            Request::builder()
                .uri("/patients")
                .header(AUTHORIZATION, "Bearer doctor-token")
                .header(COOKIE, "clinrec_token=patient-token")
                .body(())
                .unwrap(),
        );

        let ClaimAuth(claim) = ClaimAuth::from_request_parts(&mut parts, &state())
            .await
            .unwrap();
        assert_eq!(claim.role, Role::Doctor);
    }
}
