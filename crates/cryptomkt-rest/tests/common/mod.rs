//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes returned by the live CryptoMarket v1 API.

#![allow(dead_code)]

use cryptomkt_rest::{ClientConfig, Credentials, CryptomktClient, FixedClock};

/// Secret used by every signed test request
pub const SECRET: &str = "super_secure_secret";

/// API key used by every signed test request
pub const API_KEY: &str = "some_key";

/// Frozen clock value: 2012-12-21T00:00:00Z
pub const CLOCK_SECS: u64 = 1_356_048_000;

/// Sample order book page
pub const BOOK_RESPONSE: &str = r#"{
    "status": "success",
    "pagination": {"previous": "null", "limit": 20, "page": 0, "next": "null"},
    "data": [
        {"timestamp": "2017-08-31T10:42:05.483258", "price": "2480000", "amount": "0.2"},
        {"timestamp": "2017-08-31T10:41:35.871230", "price": "2479000", "amount": "1.5"}
    ]
}"#;

/// Sample ticker list
pub const TICKER_RESPONSE: &str = r#"{
    "status": "success",
    "data": [{
        "high": "2500000",
        "volume": "12.5",
        "low": "2400000",
        "ask": "2481000",
        "timestamp": "2017-08-31T10:43:45.287260",
        "bid": "2480000",
        "last_price": "2480500",
        "market": "ETHCLP"
    }]
}"#;

/// Sample order creation response
pub const CREATE_ORDER_RESPONSE: &str = r#"{
    "status": "success",
    "data": {
        "id": "M107441",
        "status": "active",
        "type": "buy",
        "price": "1000",
        "amount": {"original": "10", "remaining": "10", "executed": "0"},
        "market": "ETCBTC"
    }
}"#;

/// Sample balance response
pub const BALANCE_RESPONSE: &str = r#"{
    "status": "success",
    "data": [
        {"wallet": "CLP", "available": "1000000", "balance": "1200000"},
        {"wallet": "ETH", "available": "1.5", "balance": "1.5"}
    ]
}"#;

/// Sample authentication failure
pub const INVALID_SIGNATURE_RESPONSE: &str = r#"{"status": "error", "message": "invalid_signature"}"#;

/// Public client pointed at `base_url`
pub fn public_client(base_url: &str) -> CryptomktClient {
    CryptomktClient::with_config(ClientConfig::new().with_base_url(base_url))
        .expect("client should build")
        .with_clock(FixedClock(CLOCK_SECS))
}

/// Authenticated client pointed at `base_url`
pub fn private_client(base_url: &str) -> CryptomktClient {
    let creds = Credentials::new(API_KEY, SECRET).expect("valid credentials");
    CryptomktClient::with_config(
        ClientConfig::new()
            .with_base_url(base_url)
            .with_credentials(creds),
    )
    .expect("client should build")
    .with_clock(FixedClock(CLOCK_SECS))
}
