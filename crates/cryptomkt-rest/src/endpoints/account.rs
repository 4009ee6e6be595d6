//! Private account endpoints
//!
//! These endpoints require authentication.

use crate::dispatcher::Dispatcher;
use crate::error::RestResult;
use cryptomkt_auth::Params;
use serde_json::Value;
use tracing::instrument;

const BALANCE_PATH: &str = "/v1/balance";

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get wallet balances
    ///
    /// Returns an array with one entry per wallet.
    #[instrument(skip(self))]
    pub async fn balance(&self) -> RestResult<Value> {
        self.dispatcher.private_get(BALANCE_PATH, &Params::new()).await
    }
}
