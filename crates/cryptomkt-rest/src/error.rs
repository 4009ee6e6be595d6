//! Error types for REST API operations

use crate::transport::{HttpResponse, TransportError};
use cryptomkt_auth::AuthError;
use serde::Deserialize;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Network-level failure reported by the transport
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Server rejected the key, signature or timestamp
    #[error("Authentication failed (HTTP {status}): {message}")]
    Authentication {
        /// HTTP status code
        status: u16,
        /// Message returned by the API
        message: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimited {
        /// Message returned by the API
        message: String,
    },

    /// API returned an error
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message returned by the API
        message: String,
    },

    /// Response was not valid JSON or had no `data` field
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Credential loading failed
    #[error("Credentials error: {0}")]
    Auth(#[from] AuthError),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RestError {
    /// Check if this error indicates the server rejected our credentials
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::AuthRequired)
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// HTTP status code, if the error came from a server response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// Error body returned by CryptoMarket: `{"status": "error", "message": "..."}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub status: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub(crate) fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}

/// Map a transport response to a typed failure when its status is not 2xx
///
/// Must run before the envelope is unwrapped.
pub fn check_status(response: &HttpResponse) -> RestResult<()> {
    if response.is_success() {
        return Ok(());
    }

    let message = ErrorBody::parse(&response.body)
        .and_then(|body| body.message)
        .unwrap_or_else(|| response.body.trim().to_string());

    Err(match response.status {
        401 | 403 => RestError::Authentication {
            status: response.status,
            message,
        },
        429 => RestError::RateLimited { message },
        status => RestError::Api { status, message },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_passes() {
        assert!(check_status(&HttpResponse::new(200, "{}")).is_ok());
    }

    #[test]
    fn test_unauthorized_maps_to_authentication() {
        let response =
            HttpResponse::new(401, r#"{"status":"error","message":"invalid_signature"}"#);
        let err = check_status(&response).unwrap_err();

        assert!(err.is_auth_error());
        assert_eq!(err.status(), Some(401));
        match err {
            RestError::Authentication { message, .. } => assert_eq!(message, "invalid_signature"),
            other => panic!("Expected Authentication, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_limit() {
        let err = check_status(&HttpResponse::new(429, "Too Many Requests")).unwrap_err();
        assert!(err.is_rate_limited());
        assert_eq!(err.to_string(), "Rate limit exceeded: Too Many Requests");
    }

    #[test]
    fn test_server_error_uses_raw_body() {
        let err = check_status(&HttpResponse::new(502, "  bad gateway\n")).unwrap_err();
        match err {
            RestError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("Expected Api, got {:?}", other),
        }
    }

    #[test]
    fn test_auth_required_has_no_status() {
        assert!(RestError::AuthRequired.is_auth_error());
        assert_eq!(RestError::AuthRequired.status(), None);
    }

    #[test]
    fn test_from_auth_error() {
        let err: RestError = AuthError::EnvVarNotSet("CRYPTOMKT_API_KEY".to_string()).into();
        assert!(err.to_string().contains("CRYPTOMKT_API_KEY"));
    }
}
