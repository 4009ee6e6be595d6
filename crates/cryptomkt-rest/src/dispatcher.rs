//! Request dispatcher
//!
//! Turns a logical API call (path + [`Params`]) into an HTTP request, attaches
//! authentication headers for private calls, sends it through the
//! [`Transport`] and unwraps the `{"data": ...}` envelope.

use crate::error::{check_status, ErrorBody, RestError, RestResult};
use crate::hooks::{Hooks, RequestInfo, ResponseInfo};
use crate::transport::{HttpRequest, Transport};
use cryptomkt_auth::{Clock, Credentials, Params, RequestSigner};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};

/// Routes API calls to the transport
///
/// Cheap to clone. Clones share the transport, clock and hooks.
#[derive(Clone)]
pub struct Dispatcher {
    base_url: String,
    transport: Arc<dyn Transport>,
    credentials: Option<Arc<Credentials>>,
    clock: Arc<dyn Clock>,
    hooks: Hooks,
}

impl Dispatcher {
    /// Create a new dispatcher
    ///
    /// `base_url` must be an absolute `http` or `https` origin, e.g.
    /// `https://api.cryptomkt.com`. A trailing slash is ignored.
    pub fn new(
        base_url: &str,
        transport: Arc<dyn Transport>,
        credentials: Option<Credentials>,
        clock: Arc<dyn Clock>,
        hooks: Hooks,
    ) -> RestResult<Self> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| RestError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RestError::Config(format!(
                "unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }

        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(RestError::Config(format!(
                "base URL '{}' must not carry a query or fragment",
                base_url
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            credentials: credentials.map(Arc::new),
            clock,
            hooks,
        })
    }

    /// Replace the clock used for timestamps and date defaults
    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Clock used for timestamps
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Check if private endpoints can be called
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn credentials(&self) -> RestResult<&Credentials> {
        self.credentials.as_deref().ok_or(RestError::AuthRequired)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Unauthenticated GET with `params` as the query string
    #[instrument(skip(self, params), fields(method = "GET", auth = false))]
    pub async fn public_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> RestResult<T> {
        let request = HttpRequest::get(self.url(path)).with_query(params.clone());
        self.execute(path, request, false).await
    }

    /// Authenticated GET
    ///
    /// The signature covers an empty body. Parameters travel in the query
    /// string only.
    #[instrument(skip(self, params), fields(method = "GET", auth = true))]
    pub async fn private_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> RestResult<T> {
        let credentials = self.credentials()?;
        let signed = RequestSigner::new(credentials, path, self.clock()).sign_empty();

        let request = HttpRequest::get(self.url(path))
            .with_query(params.clone())
            .with_auth(&signed, credentials.api_key());

        self.execute(path, request, true).await
    }

    /// Authenticated POST
    ///
    /// The signature covers the canonical body of `params`. The wire body is
    /// the URL-encoded form of the same parameters.
    #[instrument(skip(self, params), fields(method = "POST", auth = true))]
    pub async fn private_post<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> RestResult<T> {
        let credentials = self.credentials()?;
        let form = serde_urlencoded::to_string(params)
            .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
        let signed = RequestSigner::new(credentials, path, self.clock()).sign_params(params);

        let request = HttpRequest::post(self.url(path))
            .with_form(form)
            .with_auth(&signed, credentials.api_key());

        self.execute(path, request, true).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: HttpRequest,
        authenticated: bool,
    ) -> RestResult<T> {
        let method = request.method;
        self.hooks.invoke_request(&RequestInfo {
            method,
            path: path.to_string(),
            authenticated,
        });

        debug!("Sending {} {}", method, path);
        let started = Instant::now();

        let result = match self.transport.execute(request).await {
            Ok(response) => {
                self.hooks.invoke_response(&ResponseInfo {
                    method,
                    path: path.to_string(),
                    status: response.status,
                    bytes: response.body.len(),
                    elapsed: started.elapsed(),
                });
                check_status(&response).and_then(|()| unwrap_envelope(&response.body))
            }
            Err(e) => Err(RestError::from(e)),
        };

        if let Err(ref e) = result {
            debug!("{} {} failed: {}", method, path, e);
            self.hooks.invoke_error(&e.to_string());
        }

        result
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .field("hooks", &self.hooks)
            .finish()
    }
}

/// Extract the `data` field from a response envelope
///
/// Fails with [`RestError::MalformedResponse`] when the body is not JSON, is
/// not an object, has no `data` field, or `data` does not fit `T`. A body
/// with `"status": "error"` and no `data` is reported as [`RestError::Api`].
pub fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> RestResult<T> {
    let mut envelope: Value = serde_json::from_str(body)
        .map_err(|e| RestError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let data = match envelope.get_mut("data") {
        Some(data) => data.take(),
        None => {
            if let Some(error) = ErrorBody::parse(body).filter(ErrorBody::is_error) {
                return Err(RestError::Api {
                    status: 200,
                    message: error.message.unwrap_or_else(|| "unknown error".to_string()),
                });
            }
            return Err(RestError::MalformedResponse(
                "missing `data` field".to_string(),
            ));
        }
    };

    serde_json::from_value(data)
        .map_err(|e| RestError::MalformedResponse(format!("unexpected `data` shape: {}", e)))
}
