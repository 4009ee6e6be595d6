//! Observability hooks for request monitoring
//!
//! Hooks let callers observe every request the client makes, for logging,
//! metrics or auditing, without wrapping the client.
//!
//! # Example
//!
//! ```
//! use cryptomkt_rest::hooks::Hooks;
//!
//! let hooks = Hooks::new()
//!     .on_request(|info| {
//!         println!("-> {} {}", info.method, info.path);
//!     })
//!     .on_response(|info| {
//!         println!("<- {} {} in {:?}", info.status, info.path, info.elapsed);
//!     })
//!     .on_error(|msg| {
//!         eprintln!("request failed: {}", msg);
//!     });
//! ```

use crate::transport::HttpMethod;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Information about an outgoing request
#[derive(Debug, Clone)]
pub struct RequestInfo {
    /// HTTP verb
    pub method: HttpMethod,
    /// Endpoint path
    pub path: String,
    /// Whether authentication headers were attached
    pub authenticated: bool,
}

/// Information about a received response
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    /// HTTP verb
    pub method: HttpMethod,
    /// Endpoint path
    pub path: String,
    /// HTTP status code
    pub status: u16,
    /// Response body size in bytes
    pub bytes: usize,
    /// Round-trip time
    pub elapsed: Duration,
}

/// Type alias for hook callbacks
pub type RequestHook = Arc<dyn Fn(&RequestInfo) + Send + Sync>;
pub type ResponseHook = Arc<dyn Fn(&ResponseInfo) + Send + Sync>;
pub type ErrorHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Observability hooks container
///
/// All hooks are optional and executed synchronously on the calling task.
/// Keep hook callbacks fast.
#[derive(Clone, Default)]
pub struct Hooks {
    /// Called before each request is sent
    pub(crate) on_request: Option<RequestHook>,
    /// Called when a response is received (any status)
    pub(crate) on_response: Option<ResponseHook>,
    /// Called on errors (with error message)
    pub(crate) on_error: Option<ErrorHook>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_request", &self.on_request.as_ref().map(|_| "..."))
            .field("on_response", &self.on_response.as_ref().map(|_| "..."))
            .field("on_error", &self.on_error.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Hooks {
    /// Create a new empty hooks container
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for outgoing requests
    pub fn on_request<F>(mut self, f: F) -> Self
    where
        F: Fn(&RequestInfo) + Send + Sync + 'static,
    {
        self.on_request = Some(Arc::new(f));
        self
    }

    /// Register a callback for received responses
    ///
    /// Called for every response, including non-2xx ones, before the status
    /// is mapped to an error.
    pub fn on_response<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResponseInfo) + Send + Sync + 'static,
    {
        self.on_response = Some(Arc::new(f));
        self
    }

    /// Register a callback for errors
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(f));
        self
    }

    /// Check if any hooks are registered
    pub fn has_hooks(&self) -> bool {
        self.on_request.is_some() || self.on_response.is_some() || self.on_error.is_some()
    }

    pub(crate) fn invoke_request(&self, info: &RequestInfo) {
        if let Some(ref hook) = self.on_request {
            hook(info);
        }
    }

    pub(crate) fn invoke_response(&self, info: &ResponseInfo) {
        if let Some(ref hook) = self.on_response {
            hook(info);
        }
    }

    pub(crate) fn invoke_error(&self, msg: &str) {
        if let Some(ref hook) = self.on_error {
            hook(msg);
        }
    }
}
