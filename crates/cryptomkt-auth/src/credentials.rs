//! API credentials for CryptoMarket private endpoints
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Requires explicit access via `expose_secret()`
//!
//! The secret is only ever used as the HMAC key. It is never sent over the wire.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{AuthError, AuthResult};
use crate::signature;

/// Environment variable holding the API key
pub(crate) const API_KEY_ENV: &str = "CRYPTOMKT_API_KEY";
/// Environment variable holding the API secret
pub(crate) const API_SECRET_ENV: &str = "CRYPTOMKT_API_SECRET";

/// API credentials for authenticated requests
///
/// Immutable once constructed. The secret is zeroized when the credentials
/// are dropped.
pub struct Credentials {
    /// API key, sent verbatim in `X-MKT-APIKEY`
    api_key: String,
    /// API secret, used only as the HMAC key
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// Both values are opaque strings issued by CryptoMarket. Neither may be
    /// empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if api_secret.is_empty() {
            return Err(AuthError::InvalidCredentials("API secret is empty".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `CRYPTOMKT_API_KEY` and `CRYPTOMKT_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        Self::new(api_key, api_secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a message with this client's secret
    ///
    /// See [`signature::sign`] for the exact message layout.
    pub fn sign(&self, timestamp: &str, path: &str, body: &str) -> String {
        signature::sign(timestamp, path, body, self.api_secret.expose_secret())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_owned()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = self
            .api_key
            .char_indices()
            .nth(8)
            .map_or(self.api_key.as_str(), |(idx, _)| &self.api_key[..idx]);

        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
