//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use crate::dispatcher::Dispatcher;
use crate::error::{RestError, RestResult};
use crate::types::{CreateOrderRequest, InstantOrderRequest, OrdersRequest};
use cryptomkt_auth::Params;
use serde_json::Value;
use tracing::{debug, instrument};

const ACTIVE_ORDERS_PATH: &str = "/v1/orders/active";
const EXECUTED_ORDERS_PATH: &str = "/v1/orders/executed";
const CANCEL_ORDER_PATH: &str = "/v1/orders/cancel";
const ORDER_STATUS_PATH: &str = "/v1/orders/status";
const CREATE_ORDER_PATH: &str = "/v1/orders/create";
const INSTANT_QUOTE_PATH: &str = "/v1/orders/instant/get";
const INSTANT_CREATE_PATH: &str = "/v1/orders/instant/create";

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// List the caller's open orders
    ///
    /// # Arguments
    /// * `request` - Market and paging (page 0, limit 20 by default)
    #[instrument(skip(self, request), fields(market = %request.market))]
    pub async fn active_orders(&self, request: &OrdersRequest) -> RestResult<Value> {
        self.dispatcher
            .private_get(ACTIVE_ORDERS_PATH, &request.to_params())
            .await
    }

    /// List the caller's executed orders
    ///
    /// # Arguments
    /// * `request` - Market and paging (page 0, limit 20 by default)
    #[instrument(skip(self, request), fields(market = %request.market))]
    pub async fn executed_orders(&self, request: &OrdersRequest) -> RestResult<Value> {
        self.dispatcher
            .private_get(EXECUTED_ORDERS_PATH, &request.to_params())
            .await
    }

    /// Cancel an order
    ///
    /// # Arguments
    /// * `id` - Order ID returned when the order was created
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &str) -> RestResult<Value> {
        let params = order_id_params(id)?;
        debug!("Cancelling order {}", id);
        self.dispatcher.private_post(CANCEL_ORDER_PATH, &params).await
    }

    /// Get the status of an order
    #[instrument(skip(self))]
    pub async fn order_status(&self, id: &str) -> RestResult<Value> {
        let params = order_id_params(id)?;
        self.dispatcher.private_get(ORDER_STATUS_PATH, &params).await
    }

    /// Quote an instant exchange order without executing it
    ///
    /// Returns how much would be received for `amount` at current market
    /// conditions.
    #[instrument(skip(self, request), fields(market = %request.market, side = %request.side))]
    pub async fn instant_order_quote(&self, request: &InstantOrderRequest) -> RestResult<Value> {
        self.dispatcher
            .private_get(INSTANT_QUOTE_PATH, &request.to_params())
            .await
    }

    /// Place a limit order
    #[instrument(skip(self, request), fields(market = %request.market, side = %request.side))]
    pub async fn create_order(&self, request: &CreateOrderRequest) -> RestResult<Value> {
        debug!(
            "Placing {} order for {} {} at {}",
            request.side, request.amount, request.market, request.price
        );
        self.dispatcher
            .private_post(CREATE_ORDER_PATH, &request.to_params())
            .await
    }

    /// Execute an instant exchange order
    #[instrument(skip(self, request), fields(market = %request.market, side = %request.side))]
    pub async fn create_instant_order(&self, request: &InstantOrderRequest) -> RestResult<Value> {
        debug!(
            "Placing instant {} order for {} {}",
            request.side, request.amount, request.market
        );
        self.dispatcher
            .private_post(INSTANT_CREATE_PATH, &request.to_params())
            .await
    }
}

fn order_id_params(id: &str) -> RestResult<Params> {
    if id.is_empty() {
        return Err(RestError::InvalidParameter("Empty order id".to_string()));
    }
    Ok(Params::new().with("id", id))
}
