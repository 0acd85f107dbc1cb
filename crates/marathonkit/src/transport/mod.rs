//! Transport abstraction for talking to Marathon.
//!
//! The [`Transport`] trait is the only way the reconciliation engine reaches
//! the orchestrator, enabling:
//! - Real HTTP requests via [`http::HttpTransport`]
//! - Scripted fakes for testing via [`mock::MockTransport`]

pub mod http;
pub mod mock;

use crate::error::Result;
use crate::types::Method;
use serde_json::Value;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON request/response capability against the Marathon API.
///
/// Paths are relative to the orchestrator's base address (`/v2/apps`). Bodies
/// are JSON text sent as-is. A successful response is returned as parsed
/// JSON, `Value::Null` when the body is empty.
pub trait Transport: Send + Sync {
    /// Send one request and wait for its response.
    fn request(&self, method: Method, path: &str, body: Option<&str>) -> Result<Value>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn request(&self, method: Method, path: &str, body: Option<&str>) -> Result<Value> {
        (**self).request(method, path, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn request(&self, method: Method, path: &str, body: Option<&str>) -> Result<Value> {
        (**self).request(method, path, body)
    }
}

/// Configuration handed to a transport when it is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Per-request timeout. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Log every request and its outcome at debug level.
    pub log_requests: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            log_requests: false,
        }
    }
}

impl TransportConfig {
    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable per-request logging.
    pub fn log_requests(mut self, log_requests: bool) -> Self {
        self.log_requests = log_requests;
        self
    }
}
