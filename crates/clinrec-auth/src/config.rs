//! Authorization gate configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the authorization gate.
///
/// # Example (TOML)
///
/// ```toml
/// [auth]
/// cookie = { enabled = true, name = "clinrec_token" }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthzConfig {
    /// Cookie-based credential fallback for browser clients.
    pub cookie: CookieConfig,
}

/// Cookie fallback for the bearer credential.
///
/// The gate always reads the `Authorization` header first; when enabled,
/// a cookie with the configured name is accepted as a fallback for
/// browser sessions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Whether the cookie fallback is accepted at all.
    pub enabled: bool,

    /// Name of the cookie carrying the credential.
    pub name: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: "clinrec_token".to_string(),
        }
    }
}
