//! Staff authentication extractor.
//!
//! Some endpoints are not scoped to a single patient — listing all
//! patients, for instance — and short-circuit on role alone rather than
//! consulting the decision engine.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get, Json};
//! use clinrec_auth::middleware::StaffAuth;
//!
//! async fn list_patients(StaffAuth(claim): StaffAuth) -> Json<Vec<Patient>> {
//!     // Only admins and doctors reach this point.
//! }
//! ```

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::error::AuthzError;
use crate::types::IdentityClaim;

use super::auth::{ClaimAuth, GateState};

// =============================================================================
// Staff Auth Extractor
// =============================================================================

/// Axum extractor that requires an admin or doctor claim.
///
/// Validates the bearer credential like [`ClaimAuth`], then rejects any
/// actor whose role is not staff.
#[derive(Debug, Clone)]
pub struct StaffAuth(pub IdentityClaim);

impl<S> FromRequestParts<S> for StaffAuth
where
    S: Send + Sync,
    GateState: FromRef<S>,
{
    type Rejection = AuthzError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ClaimAuth(claim) = ClaimAuth::from_request_parts(parts, state).await?;

        if !claim.role.is_staff() {
            tracing::debug!(actor = %claim, "Staff access denied");
            return Err(AuthzError::forbidden(
                "Access denied. Insufficient privileges.",
            ));
        }

        Ok(Self(claim))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::TokenVerifier;
    use crate::types::Role;
    use async_trait::async_trait;
    use axum::http::{Request, header::AUTHORIZATION};
    use clinrec_core::UserId;
    use std::sync::Arc;

    struct RoleVerifier;

    #[async_trait]
    impl TokenVerifier for RoleVerifier {
        async fn verify(&self, token: &str) -> Result<IdentityClaim, AuthzError> {
            let role: Role = token.parse()?;
            Ok(IdentityClaim::new(UserId::new(1), role))
        }
    }

    fn state() -> GateState {
        GateState::new(Arc::new(RoleVerifier))
    }

    async fn extract(token: &str) -> Result<StaffAuth, AuthzError> {
        let request = Request::builder()
            .uri("/patients")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        StaffAuth::from_request_parts(&mut parts, &state()).await
    }

    #[tokio::test]
    async fn test_admin_and_doctor_pass() {
        assert_eq!(extract("admin").await.unwrap().0.role, Role::Admin);
        assert_eq!(extract("doctor").await.unwrap().0.role, Role::Doctor);
    }

    #[tokio::test]
    async fn test_patient_is_forbidden() {
        let err = extract("patient").await.unwrap_err();
        assert!(err.is_authorization_error());
    }

    #[tokio::test]
    async fn test_garbled_role_is_rejected() {
        let err = extract("superuser").await.unwrap_err();
        assert!(err.is_authentication_error());
    }
}
