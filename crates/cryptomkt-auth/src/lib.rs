//! Credentials and request signing for the CryptoMarket REST API
//!
//! Every private CryptoMarket endpoint expects three headers:
//!
//! - `X-MKT-APIKEY`: the raw API key
//! - `X-MKT-TIMESTAMP`: current Unix time in seconds
//! - `X-MKT-SIGNATURE`: `hex(HMAC-SHA384(secret, timestamp + path + body))`
//!
//! where `body` is empty for GET requests and, for POST requests, the values
//! of the request parameters concatenated in ascending key order.
//!
//! This crate performs no I/O. It turns credentials, a path and a set of
//! [`Params`] into a [`SignedRequest`] that a transport can attach to an
//! outgoing request.
//!
//! # Example
//!
//! ```
//! use cryptomkt_auth::{Credentials, FixedClock, Params, RequestSigner};
//!
//! let creds = Credentials::new("my_key", "my_secret").unwrap();
//! let params = Params::new()
//!     .with("market", "ETHCLP")
//!     .with("type", "buy")
//!     .with("amount", "0.5")
//!     .with("price", "1800000");
//!
//! let signer = RequestSigner::new(&creds, "/v1/orders/create", &FixedClock(1_356_048_000));
//! let signed = signer.sign_params(&params);
//!
//! assert_eq!(signed.body, "0.5ETHCLP1800000buy");
//! assert_eq!(signed.signature.len(), 96);
//! ```

mod clock;
mod credentials;
mod error;
mod params;
mod signature;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
pub use params::Params;
pub use signature::{
    canonical_body, sign, RequestSigner, SignedRequest, API_KEY_HEADER, SIGNATURE_HEADER,
    TIMESTAMP_HEADER,
};
