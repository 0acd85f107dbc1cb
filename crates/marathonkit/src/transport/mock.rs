//! In-memory transport for tests.
//!
//! Responses are scripted per `(method, path)` before use; every request is
//! recorded so tests can assert on exactly what would have reached Marathon.

use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::Method;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base address.
    pub path: String,
    /// Request body, if any.
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Json(Value),
    Fail { status: Option<u16> },
}

/// Scripted fake of the Marathon API.
///
/// Unscripted requests succeed with a deployment acknowledgement, the way
/// Marathon answers DELETE and PUT calls.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<(Method, String), MockResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `body`.
    pub fn respond(mut self, method: Method, path: impl Into<String>, body: Value) -> Self {
        self.responses
            .insert((method, path.into()), MockResponse::Json(body));
        self
    }

    /// Fail `method path` with a transport error.
    pub fn fail(mut self, method: Method, path: impl Into<String>, status: Option<u16>) -> Self {
        self.responses
            .insert((method, path.into()), MockResponse::Fail { status });
        self
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests received with the given method, in arrival order.
    pub fn requests_with(&self, method: Method) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }
}

impl Transport for MockTransport {
    fn request(&self, method: Method, path: &str, body: Option<&str>) -> Result<Value> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method,
                path: path.to_string(),
                body: body.map(str::to_string),
            });

        match self.responses.get(&(method, path.to_string())) {
            Some(MockResponse::Json(value)) => Ok(value.clone()),
            Some(MockResponse::Fail { status }) => {
                let message = match status {
                    Some(code) => format!("HTTP {}", code),
                    None => "connection refused".to_string(),
                };
                Err(Error::transport(method, path, message, *status))
            }
            None => Ok(json!({
                "version": "2015-08-25T10:06:19.918Z",
                "deploymentId": "7828f718-ef25-426b-9d80-82ad3b39c8ae"
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_requests() {
        let mock = MockTransport::new();
        mock.request(Method::Put, "/v2/groups", Some("{}")).unwrap();
        mock.request(Method::Delete, "/v2/apps/a", None).unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].body.as_deref(), Some("{}"));
        assert_eq!(mock.requests_with(Method::Delete)[0].path, "/v2/apps/a");
    }

    #[test]
    fn test_scripted_failure() {
        let mock = MockTransport::new().fail(Method::Delete, "/v2/apps/a", Some(503));
        let err = mock.request(Method::Delete, "/v2/apps/a", None).unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_default_ack() {
        let mock = MockTransport::new();
        let ack = mock.request(Method::Put, "/v2/groups", Some("{}")).unwrap();
        assert!(ack.get("deploymentId").is_some());
    }
}
