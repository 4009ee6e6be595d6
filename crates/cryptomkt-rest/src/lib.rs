//! REST API client for the CryptoMarket cryptocurrency exchange
//!
//! This crate provides a REST client for CryptoMarket's v1 API, covering
//! public market data and authenticated trading.
//!
//! # Features
//!
//! - **Market Data**: Order book, trades, ticker, market list
//! - **Trading**: Create, cancel and query limit and instant orders
//! - **Account**: Wallet balances
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA384 over `timestamp + path + body`, see [`cryptomkt_auth`].
//!
//! # Example
//!
//! ```no_run
//! use cryptomkt_rest::{CryptomktClient, Credentials, CreateOrderRequest};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = CryptomktClient::new()?;
//!     let ticker = client.ticker(Some("ETHCLP")).await?;
//!     println!("ETH/CLP: {}", ticker);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = CryptomktClient::with_credentials(creds)?;
//!     let order = auth_client
//!         .create_order(&CreateOrderRequest::buy("ETHCLP", dec!(0.5), dec!(1800000)))
//!         .await?;
//!     println!("Order: {}", order);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Responses
//!
//! Every response is wrapped in a `{"data": ...}` envelope. Endpoint methods
//! return the `data` value only. Use [`Dispatcher`] directly to deserialize
//! it into your own types.

pub mod client;
pub mod dispatcher;
pub mod endpoints;
pub mod error;
pub mod hooks;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, CryptomktClient, PRODUCTION_URL};
pub use dispatcher::{unwrap_envelope, Dispatcher};
pub use error::{check_status, RestError, RestResult};
pub use hooks::Hooks;
pub use transport::{HttpTransport, Transport, TransportError};

pub use cryptomkt_auth::{Clock, Credentials, FixedClock, Params, SystemClock};

// Re-export endpoint-specific types
pub use types::{
    BookRequest, CreateOrderRequest, InstantOrderRequest, OrderSide, OrdersRequest, TradesRequest,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
