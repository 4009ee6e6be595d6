//! Types for CryptoMarket REST API requests
//!
//! Each endpoint takes an explicit request struct. Required fields are
//! constructor arguments; optional fields have documented defaults and
//! `with_*` setters.

use chrono::NaiveDate;
use cryptomkt_auth::Params;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default page for public listings
pub const DEFAULT_PAGE: u32 = 1;
/// Default page for the caller's own order listings
pub const DEFAULT_ORDERS_PAGE: u32 = 0;
/// Default page size
pub const DEFAULT_LIMIT: u32 = 20;

/// Date format used by the trades endpoint
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Enums
// ============================================================================

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Side as sent in the `type` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Market Data Requests
// ============================================================================

/// Order book request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRequest {
    /// Market pair (e.g., "ETHCLP")
    pub market: String,
    /// Which side of the book
    pub side: OrderSide,
    /// Page number (default 1)
    pub page: u32,
    /// Page size (default 20)
    pub limit: u32,
}

impl BookRequest {
    /// Create a book request with default paging
    pub fn new(market: impl Into<String>, side: OrderSide) -> Self {
        Self {
            market: market.into(),
            side,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Set page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("market", &self.market)
            .with("type", self.side)
            .with("page", self.page)
            .with("limit", self.limit)
    }
}

/// Trades history request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradesRequest {
    /// Market pair
    pub market: String,
    /// First day included (default: today, UTC)
    pub start: Option<NaiveDate>,
    /// Last day included (default: today, UTC)
    pub end: Option<NaiveDate>,
    /// Page number (default 1)
    pub page: u32,
    /// Page size (default 20)
    pub limit: u32,
}

impl TradesRequest {
    /// Create a trades request covering today
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            start: None,
            end: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Set date range
    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Set start date
    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Set end date
    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Set page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub(crate) fn to_params(&self, today: NaiveDate) -> Params {
        let start = self.start.unwrap_or(today);
        let end = self.end.unwrap_or(today);

        Params::new()
            .with("market", &self.market)
            .with("start", start.format(DATE_FORMAT))
            .with("end", end.format(DATE_FORMAT))
            .with("page", self.page)
            .with("limit", self.limit)
    }
}

// ============================================================================
// Trading Requests
// ============================================================================

/// Request for the caller's active or executed orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersRequest {
    /// Market pair
    pub market: String,
    /// Page number (default 0)
    pub page: u32,
    /// Page size (default 20)
    pub limit: u32,
}

impl OrdersRequest {
    /// Create an orders request with default paging
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            page: DEFAULT_ORDERS_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Set page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("market", &self.market)
            .with("page", self.page)
            .with("limit", self.limit)
    }
}

/// Limit order creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderRequest {
    /// Market pair
    pub market: String,
    /// Order side
    pub side: OrderSide,
    /// Order amount in the base currency
    pub amount: Decimal,
    /// Limit price in the quote currency
    pub price: Decimal,
}

impl CreateOrderRequest {
    /// Create a limit order request
    pub fn new(
        market: impl Into<String>,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            market: market.into(),
            side,
            amount,
            price,
        }
    }

    /// Create a limit buy order request
    pub fn buy(market: impl Into<String>, amount: Decimal, price: Decimal) -> Self {
        Self::new(market, OrderSide::Buy, amount, price)
    }

    /// Create a limit sell order request
    pub fn sell(market: impl Into<String>, amount: Decimal, price: Decimal) -> Self {
        Self::new(market, OrderSide::Sell, amount, price)
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("market", &self.market)
            .with("type", self.side)
            .with("amount", self.amount)
            .with("price", self.price)
    }
}

/// Instant exchange request, used both for quotes and for execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantOrderRequest {
    /// Market pair
    pub market: String,
    /// Order side
    pub side: OrderSide,
    /// Amount to spend (buy) or sell
    pub amount: Decimal,
}

impl InstantOrderRequest {
    /// Create an instant order request
    pub fn new(market: impl Into<String>, side: OrderSide, amount: Decimal) -> Self {
        Self {
            market: market.into(),
            side,
            amount,
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("market", &self.market)
            .with("type", self.side)
            .with("amount", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_side_display() {
        assert_eq!(OrderSide::Buy.to_string(), "buy");
        assert_eq!(OrderSide::Sell.to_string(), "sell");
        assert_eq!(serde_json::to_string(&OrderSide::Sell).unwrap(), "\"sell\"");
    }

    #[test]
    fn test_book_defaults() {
        let params = BookRequest::new("ETHCLP", OrderSide::Buy).to_params();
        assert_eq!(params.get("market"), Some("ETHCLP"));
        assert_eq!(params.get("type"), Some("buy"));
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("limit"), Some("20"));
    }

    #[test]
    fn test_book_limit_override() {
        let params = BookRequest::new("ETHCLP", OrderSide::Sell)
            .with_limit(5)
            .with_page(3)
            .to_params();
        assert_eq!(params.get("limit"), Some("5"));
        assert_eq!(params.get("page"), Some("3"));
    }

    #[test]
    fn test_trades_default_to_today() {
        let today = NaiveDate::from_ymd_opt(2012, 12, 21).unwrap();
        let params = TradesRequest::new("ETHCLP").to_params(today);

        assert_eq!(params.get("start"), Some("2012-12-21"));
        assert_eq!(params.get("end"), Some("2012-12-21"));
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("limit"), Some("20"));
    }

    #[test]
    fn test_trades_explicit_range() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let params = TradesRequest::new("BTCARS").with_start(start).to_params(today);

        assert_eq!(params.get("start"), Some("2024-03-01"));
        assert_eq!(params.get("end"), Some("2024-03-10"));
    }

    #[test]
    fn test_orders_defaults() {
        let params = OrdersRequest::new("ETHCLP").to_params();
        assert_eq!(params.get("page"), Some("0"));
        assert_eq!(params.get("limit"), Some("20"));
    }

    #[test]
    fn test_create_order_params() {
        let params = CreateOrderRequest::buy("ETCBTC", dec!(10), dec!(1000)).to_params();
        assert_eq!(params.get("type"), Some("buy"));
        assert_eq!(params.get("amount"), Some("10"));
        assert_eq!(params.get("price"), Some("1000"));
        assert_eq!(cryptomkt_auth::canonical_body(&params), "10ETCBTC1000buy");
    }

    #[test]
    fn test_decimal_keeps_scale() {
        let params = InstantOrderRequest::new("ETHCLP", OrderSide::Sell, dec!(0.50)).to_params();
        assert_eq!(params.get("amount"), Some("0.50"));
    }
}
