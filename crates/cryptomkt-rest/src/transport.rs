//! HTTP transport abstraction
//!
//! The dispatcher never talks to `reqwest` directly. It hands a fully built
//! [`HttpRequest`] to a [`Transport`] and gets back the raw status and body.
//! This keeps signing and envelope handling testable without a network, and
//! lets callers plug in their own HTTP stack.
//!
//! # Example
//!
//! ```no_run
//! use cryptomkt_rest::transport::{HttpRequest, HttpTransport, Transport, TransportError};
//! use cryptomkt_auth::Params;
//!
//! async fn example() -> Result<(), TransportError> {
//!     let transport = HttpTransport::new(30, None)?;
//!     let request = HttpRequest::get("https://api.cryptomkt.com/v1/market")
//!         .with_query(Params::new());
//!     let response = transport.execute(request).await?;
//!     println!("{} {}", response.status, response.body);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use cryptomkt_auth::{Params, SignedRequest};
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Default user agent sent by [`HttpTransport`]
pub const DEFAULT_USER_AGENT: &str = concat!("cryptomkt-rest/", env!("CARGO_PKG_VERSION"));

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection could not be established
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request did not complete in time
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Request could not be sent
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be read
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// HTTP client could not be built
    #[error("client build failed: {0}")]
    Build(String),
}

/// HTTP verb used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET with query parameters
    Get,
    /// POST with a form body
    Post,
}

impl HttpMethod {
    /// Verb as an uppercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully built HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP verb
    pub method: HttpMethod,
    /// Absolute URL without query string
    pub url: String,
    /// Extra headers
    pub headers: Vec<(String, String)>,
    /// Query parameters
    pub query: Params,
    /// URL-encoded form body (POST only)
    pub body: Option<String>,
}

impl HttpRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            query: Params::new(),
            body: None,
        }
    }

    /// Set query parameters
    pub fn with_query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    /// Set a URL-encoded form body
    pub fn with_form(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach the three authentication headers of a signed request
    pub fn with_auth(mut self, signed: &SignedRequest, api_key: &str) -> Self {
        for (name, value) in signed.headers(api_key) {
            self = self.with_header(name, value);
        }
        self
    }

    /// Look up a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP transport abstraction
///
/// Implementations must not treat non-2xx statuses as errors. The status is
/// returned as data and mapped by the caller. Only network-level failures
/// are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one HTTP round trip
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Real transport using `reqwest`
///
/// The underlying `reqwest::Client` pools connections internally and is
/// released when the transport is dropped.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a new transport
    ///
    /// # Arguments
    /// * `timeout_secs` - Whole-request timeout
    /// * `user_agent` - Custom user agent (defaults to [`DEFAULT_USER_AGENT`])
    pub fn new(timeout_secs: u64, user_agent: Option<&str>) -> Result<Self, TransportError> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Wrap an existing `reqwest::Client`
    pub fn from_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn map_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if error.is_connect() {
            TransportError::ConnectionFailed(error.to_string())
        } else {
            TransportError::RequestFailed(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        builder = builder.query(&request.query);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::ReceiveFailed(e.to_string()))?;

        debug!(status, bytes = body.len(), "Received response");

        Ok(HttpResponse { status, body })
    }
}

/// Mock transport for testing
///
/// Returns queued responses in order and records every request it receives.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: parking_lot::Mutex<std::collections::VecDeque<Result<HttpResponse, TransportError>>>,
    requests: parking_lot::Mutex<Vec<HttpRequest>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queue a 200 response wrapping `data` in the API envelope
    pub fn push_data(&self, data: serde_json::Value) {
        let body = serde_json::json!({ "status": "success", "data": data });
        self.push_response(200, body.to_string());
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::ConnectionFailed("no mock response queued".into()))
            })
    }
}
