//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use crate::dispatcher::Dispatcher;
use crate::error::{RestError, RestResult};
use crate::types::{BookRequest, TradesRequest};
use chrono::{DateTime, NaiveDate};
use cryptomkt_auth::{Clock, Params};
use serde_json::Value;
use tracing::{debug, instrument};

const BOOK_PATH: &str = "/v1/book";
const TRADES_PATH: &str = "/v1/trades";
const MARKET_PATH: &str = "/v1/market";
const TICKER_PATH: &str = "/v1/ticker";

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get one side of the order book
    ///
    /// # Arguments
    /// * `request` - Market, side and paging (page 1, limit 20 by default)
    #[instrument(skip(self, request), fields(market = %request.market, side = %request.side))]
    pub async fn book(&self, request: &BookRequest) -> RestResult<Value> {
        debug!("Fetching {} book for {}", request.side, request.market);
        self.dispatcher.public_get(BOOK_PATH, &request.to_params()).await
    }

    /// Get trades executed in a date range
    ///
    /// Missing bounds default to today's UTC date according to the client's clock.
    #[instrument(skip(self, request), fields(market = %request.market))]
    pub async fn trades(&self, request: &TradesRequest) -> RestResult<Value> {
        let today = today(self.dispatcher.clock())?;
        self.dispatcher
            .public_get(TRADES_PATH, &request.to_params(today))
            .await
    }

    /// List available market pairs
    #[instrument(skip(self))]
    pub async fn markets(&self) -> RestResult<Value> {
        self.dispatcher.public_get(MARKET_PATH, &Params::new()).await
    }

    /// Get tickers for all markets, or for one market only
    ///
    /// # Arguments
    /// * `market` - Optional market pair filter (e.g., "ETHCLP")
    #[instrument(skip(self))]
    pub async fn ticker(&self, market: Option<&str>) -> RestResult<Value> {
        let params = Params::new().with_opt("market", market);
        self.dispatcher.public_get(TICKER_PATH, &params).await
    }
}

/// Current UTC calendar date according to `clock`
fn today(clock: &dyn Clock) -> RestResult<NaiveDate> {
    i64::try_from(clock.unix_seconds())
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.date_naive())
        .ok_or_else(|| {
            RestError::InvalidParameter("clock out of range for a calendar date".to_string())
        })
}
