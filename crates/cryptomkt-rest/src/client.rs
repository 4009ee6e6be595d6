//! Main REST client implementation

use crate::dispatcher::Dispatcher;
use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::hooks::Hooks;
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    BookRequest, CreateOrderRequest, InstantOrderRequest, OrdersRequest, TradesRequest,
};
use cryptomkt_auth::{AuthError, Clock, Credentials, SystemClock};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Production API origin
pub const PRODUCTION_URL: &str = "https://api.cryptomkt.com";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the API origin
const API_URL_ENV: &str = "CRYPTOMKT_API_URL";

/// CryptoMarket REST API client
///
/// Provides access to both public and private endpoints. Clones share the
/// same transport, so one client can serve many tasks.
///
/// # Example
///
/// ```no_run
/// use cryptomkt_rest::{BookRequest, CryptomktClient, Credentials, OrderSide};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = CryptomktClient::new()?;
///     let book = client.book(&BookRequest::new("ETHCLP", OrderSide::Buy)).await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = CryptomktClient::with_credentials(creds)?;
///     let balance = auth_client.balance().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CryptomktClient {
    dispatcher: Dispatcher,
}

impl CryptomktClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let transport = HttpTransport::new(config.timeout_secs, config.user_agent.as_deref())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a new client sending requests through `transport`
    ///
    /// The timeout and user agent in `config` are not applied; they belong to
    /// the transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> RestResult<Self> {
        let dispatcher = Dispatcher::new(
            &config.base_url,
            transport,
            config.credentials,
            Arc::new(SystemClock),
            config.hooks,
        )?;

        info!(base_url = %dispatcher.base_url(), "Created CryptoMarket REST client");

        Ok(Self { dispatcher })
    }

    /// Replace the clock used for request timestamps and date defaults
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.dispatcher.set_clock(Arc::new(clock));
        self
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.dispatcher.has_credentials()
    }

    /// Underlying dispatcher, for endpoints not wrapped by this client
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.dispatcher)
    }

    /// Get one side of the order book
    pub async fn book(&self, request: &BookRequest) -> RestResult<Value> {
        self.market().book(request).await
    }

    /// Get trades in a date range (today by default)
    pub async fn trades(&self, request: &TradesRequest) -> RestResult<Value> {
        self.market().trades(request).await
    }

    /// List available market pairs
    pub async fn markets(&self) -> RestResult<Value> {
        self.market().markets().await
    }

    /// Get tickers, optionally for a single market
    pub async fn ticker(&self, market: Option<&str>) -> RestResult<Value> {
        self.market().ticker(market).await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        self.require_credentials()?;
        Ok(TradingEndpoints::new(&self.dispatcher))
    }

    /// List open orders
    pub async fn active_orders(&self, request: &OrdersRequest) -> RestResult<Value> {
        self.trading()?.active_orders(request).await
    }

    /// List executed orders
    pub async fn executed_orders(&self, request: &OrdersRequest) -> RestResult<Value> {
        self.trading()?.executed_orders(request).await
    }

    /// Cancel an order by ID
    pub async fn cancel_order(&self, id: &str) -> RestResult<Value> {
        self.trading()?.cancel_order(id).await
    }

    /// Get the status of an order by ID
    pub async fn order_status(&self, id: &str) -> RestResult<Value> {
        self.trading()?.order_status(id).await
    }

    /// Quote an instant exchange order
    pub async fn instant_order_quote(&self, request: &InstantOrderRequest) -> RestResult<Value> {
        self.trading()?.instant_order_quote(request).await
    }

    /// Place a limit order
    pub async fn create_order(&self, request: &CreateOrderRequest) -> RestResult<Value> {
        self.trading()?.create_order(request).await
    }

    /// Execute an instant exchange order
    pub async fn create_instant_order(&self, request: &InstantOrderRequest) -> RestResult<Value> {
        self.trading()?.create_instant_order(request).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        self.require_credentials()?;
        Ok(AccountEndpoints::new(&self.dispatcher))
    }

    /// Get wallet balances
    pub async fn balance(&self) -> RestResult<Value> {
        self.account()?.balance().await
    }

    fn require_credentials(&self) -> RestResult<()> {
        if self.has_credentials() {
            Ok(())
        } else {
            Err(RestError::AuthRequired)
        }
    }
}

impl std::fmt::Debug for CryptomktClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptomktClient")
            .field("base_url", &self.dispatcher.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API origin (default: production)
    pub base_url: String,
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Observability hooks
    pub hooks: Hooks,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: PRODUCTION_URL.to_string(),
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            hooks: Hooks::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the environment
    ///
    /// Reads `CRYPTOMKT_API_URL` (optional) and the credential variables
    /// `CRYPTOMKT_API_KEY` / `CRYPTOMKT_API_SECRET`. Without credential
    /// variables the configuration is public-only.
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var(API_URL_ENV) {
            config.base_url = base_url;
        }

        match Credentials::from_env() {
            Ok(credentials) => config.credentials = Some(credentials),
            Err(AuthError::EnvVarNotSet(var)) => {
                debug!("{} not set, private endpoints disabled", var);
            }
            Err(e) => return Err(e.into()),
        }

        Ok(config)
    }

    /// Set API origin (e.g., a staging environment)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set observability hooks
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }
}
