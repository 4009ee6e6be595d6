//! CryptoMarket request signature
//!
//! Signature algorithm:
//! 1. body = "" for GET, or the parameter values concatenated in ascending key order
//! 2. message = timestamp + path + body
//! 3. HMAC-SHA384(secret, message)
//! 4. Lowercase hex encode result

use hmac::{Hmac, Mac};
use sha2::Sha384;

use crate::clock::Clock;
use crate::credentials::Credentials;
use crate::params::Params;

type HmacSha384 = Hmac<Sha384>;

/// Header carrying the raw API key
pub const API_KEY_HEADER: &str = "X-MKT-APIKEY";
/// Header carrying the hex signature
pub const SIGNATURE_HEADER: &str = "X-MKT-SIGNATURE";
/// Header carrying the Unix timestamp used in the signature
pub const TIMESTAMP_HEADER: &str = "X-MKT-TIMESTAMP";

/// Build the canonical body of a parameter mapping
///
/// Values are concatenated in ascending key order with no separator. Keys do
/// not appear in the output.
pub fn canonical_body(params: &Params) -> String {
    params.values().collect()
}

/// Compute the request signature
///
/// # Arguments
/// * `timestamp` - Unix time in seconds as decimal text
/// * `path` - Endpoint path without query string (e.g., "/v1/orders/create")
/// * `body` - Canonical body, or empty string for GET requests
/// * `secret` - API secret
///
/// # Returns
/// Lowercase hex-encoded HMAC-SHA384 digest (96 characters)
pub fn sign(timestamp: &str, path: &str, body: &str, secret: &str) -> String {
    let mut mac =
        HmacSha384::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(path.as_bytes());
    mac.update(body.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}

/// A signed request, ready to have its headers attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Unix seconds as decimal text
    pub timestamp: String,
    /// Endpoint path
    pub path: String,
    /// Canonical body that was signed (empty for GET)
    pub body: String,
    /// Hex signature
    pub signature: String,
}

impl SignedRequest {
    /// Sign `body` for `path` at `timestamp`
    pub fn new(
        credentials: &Credentials,
        timestamp: impl Into<String>,
        path: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let timestamp = timestamp.into();
        let path = path.into();
        let body = body.into();
        let signature = credentials.sign(&timestamp, &path, &body);

        Self {
            timestamp,
            path,
            body,
            signature,
        }
    }

    /// Authentication headers for this request
    pub fn headers<'a>(&'a self, api_key: &'a str) -> [(&'static str, &'a str); 3] {
        [
            (API_KEY_HEADER, api_key),
            (SIGNATURE_HEADER, self.signature.as_str()),
            (TIMESTAMP_HEADER, self.timestamp.as_str()),
        ]
    }
}

/// Request signer for building authenticated requests
///
/// Samples the timestamp once, when created. Create one signer per request.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    path: String,
    timestamp: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    pub fn new(credentials: &'a Credentials, path: impl Into<String>, clock: &dyn Clock) -> Self {
        Self {
            credentials,
            path: path.into(),
            timestamp: clock.timestamp(),
        }
    }

    /// Get the timestamp for this request
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign with an empty body (GET requests)
    pub fn sign_empty(&self) -> SignedRequest {
        SignedRequest::new(self.credentials, self.timestamp.as_str(), self.path.as_str(), "")
    }

    /// Sign with the canonical body of `params` (POST requests)
    pub fn sign_params(&self, params: &Params) -> SignedRequest {
        SignedRequest::new(
            self.credentials,
            self.timestamp.as_str(),
            self.path.as_str(),
            canonical_body(params),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    const SECRET: &str = "super_secure_secret";
    const TIMESTAMP: &str = "1356048000";
    const PATH: &str = "/api/coolEndpoint";
    const EXPECTED: &str = "883f32ab4cac82653fe16eb5febc494f4726e2d98df6a94b5a9cd2df493dc33889f4e4766f84e47c1e07a4d503847ea1";

    fn order_params(side: &str) -> Params {
        Params::from([
            ("market", "ETCBTC"),
            ("amount", "10"),
            ("price", "1000"),
            ("type", side),
        ])
    }

    fn sign_params(timestamp: &str, path: &str, params: &Params, secret: &str) -> String {
        sign(timestamp, path, &canonical_body(params), secret)
    }

    #[test]
    fn test_canonical_body_sorts_by_key() {
        assert_eq!(canonical_body(&order_params("buy")), "10ETCBTC1000buy");
    }

    #[test]
    fn test_canonical_body_empty() {
        assert_eq!(canonical_body(&Params::new()), "");
    }

    #[test]
    fn test_canonical_body_concatenates_numbers() {
        let params = Params::new().with("a", 10).with("b", 20);
        assert_eq!(canonical_body(&params), "1020");
    }

    #[test]
    fn test_known_vector() {
        let signature = sign_params(TIMESTAMP, PATH, &order_params("buy"), SECRET);
        assert_eq!(signature, EXPECTED);
    }

    #[test]
    fn test_known_vector_empty_body() {
        let signature = sign(TIMESTAMP, "/v1/balance", "", SECRET);
        assert_eq!(
            signature,
            "05ff0e18887a58525c6d2e707952c9099f334cbb8a7d3492fd036bb9f0d963e45f0dea257e0144f9e9e50ac3e22f5cb7"
        );
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let signature = sign(TIMESTAMP, PATH, "", SECRET);
        assert_eq!(signature.len(), 96);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_deterministic() {
        let params = order_params("buy");
        let first = sign_params(TIMESTAMP, PATH, &params, SECRET);
        let second = sign_params(TIMESTAMP, PATH, &params, SECRET);
        assert_eq!(first, second);
    }

    #[test]
    fn test_insertion_order_independent() {
        let reordered = Params::new()
            .with("type", "buy")
            .with("price", "1000")
            .with("amount", "10")
            .with("market", "ETCBTC");

        assert_eq!(sign_params(TIMESTAMP, PATH, &reordered, SECRET), EXPECTED);
    }

    #[test]
    fn test_body_change_changes_signature() {
        let signature = sign_params(TIMESTAMP, PATH, &order_params("sell"), SECRET);
        assert_ne!(signature, EXPECTED);
    }

    #[test]
    fn test_secret_change_changes_signature() {
        let signature = sign_params(TIMESTAMP, PATH, &order_params("buy"), "another secret");
        assert_ne!(signature, EXPECTED);
    }

    #[test]
    fn test_timestamp_change_changes_signature() {
        let signature = sign_params("1356048001", PATH, &order_params("buy"), SECRET);
        assert_ne!(signature, EXPECTED);
    }

    #[test]
    fn test_path_change_changes_signature() {
        let signature = sign_params(TIMESTAMP, "/api/otherEndpoint", &order_params("buy"), SECRET);
        assert_ne!(signature, EXPECTED);
    }

    #[test]
    fn test_empty_body_differs_from_params_body() {
        let empty = sign(TIMESTAMP, PATH, "", SECRET);
        assert_ne!(empty, EXPECTED);
    }

    #[test]
    fn test_request_signer_uses_clock() {
        let creds = Credentials::new("some_key", SECRET).unwrap();
        let signer = RequestSigner::new(&creds, PATH, &FixedClock(1_356_048_000));

        assert_eq!(signer.timestamp(), TIMESTAMP);
        assert_eq!(signer.api_key(), "some_key");

        let signed = signer.sign_params(&order_params("buy"));
        assert_eq!(signed.body, "10ETCBTC1000buy");
        assert_eq!(signed.signature, EXPECTED);
    }

    #[test]
    fn test_request_signer_empty_body() {
        let creds = Credentials::new("some_key", SECRET).unwrap();
        let signer = RequestSigner::new(&creds, PATH, &FixedClock(1_356_048_000));

        let signed = signer.sign_empty();
        assert!(signed.body.is_empty());
        assert_eq!(signed.signature, sign(TIMESTAMP, PATH, "", SECRET));
    }

    #[test]
    fn test_signed_request_headers() {
        let creds = Credentials::new("some_key", SECRET).unwrap();
        let signed = SignedRequest::new(&creds, TIMESTAMP, PATH, "10ETCBTC1000buy");
        let headers = signed.headers(creds.api_key());

        assert_eq!(headers[0], (API_KEY_HEADER, "some_key"));
        assert_eq!(headers[1], (SIGNATURE_HEADER, EXPECTED));
        assert_eq!(headers[2], (TIMESTAMP_HEADER, TIMESTAMP));
    }
}
