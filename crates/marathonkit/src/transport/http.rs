//! HTTP transport backed by `ureq`.
//!
//! Every request carries `Content-Type: application/json` and
//! `Accept: application/json`. Non-2xx statuses are errors.

use crate::error::{Error, Result};
use crate::transport::{Transport, TransportConfig};
use crate::types::Method;
use serde_json::Value;

/// Maximum response size (the app listing of a large cluster stays well below).
const MAX_BODY_SIZE: u64 = 64 * 1024 * 1024;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Marathon transport over HTTP.
///
/// # Example
///
/// ```no_run
/// use marathonkit::transport::http::HttpTransport;
/// use marathonkit::transport::{Transport, TransportConfig};
/// use marathonkit::Method;
///
/// let transport = HttpTransport::new("http://localhost:8080", TransportConfig::default());
/// let apps = transport.request(Method::Get, "/v2/apps", None)?;
/// println!("{apps}");
/// # Ok::<(), marathonkit::Error>(())
/// ```
pub struct HttpTransport {
    /// HTTP agent for requests.
    agent: ureq::Agent,
    /// Marathon base address, without a trailing `/`.
    base_url: String,
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a transport for the Marathon API at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, config: TransportConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(config.timeout)
            .http_status_as_error(true)
            .build()
            .into();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            agent,
            base_url,
            config,
        }
    }

    /// Get the Marathon base address.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the transport configuration.
    #[must_use]
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Build the full URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, method: Method, path: &str, body: Option<&str>) -> Result<String> {
        let url = self.url(path);
        let response = match method {
            Method::Get => self
                .agent
                .get(&url)
                .header("Accept", JSON_CONTENT_TYPE)
                .call(),
            Method::Delete => self
                .agent
                .delete(&url)
                .header("Accept", JSON_CONTENT_TYPE)
                .call(),
            Method::Put => self
                .agent
                .put(&url)
                .header("Content-Type", JSON_CONTENT_TYPE)
                .header("Accept", JSON_CONTENT_TYPE)
                .send(body.unwrap_or_default()),
        };

        let mut response = response.map_err(|e| transport_error(method, path, e))?;

        response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_SIZE)
            .read_to_string()
            .map_err(|e| transport_error(method, path, e))
    }
}

impl Transport for HttpTransport {
    fn request(&self, method: Method, path: &str, body: Option<&str>) -> Result<Value> {
        let url = self.url(path);
        if self.config.log_requests {
            log::debug!("{} {}", method, url);
        }

        let result = self
            .send(method, path, body)
            .and_then(|text| parse_body(method, path, &text));

        if self.config.log_requests {
            match &result {
                Ok(_) => log::debug!("{} {} succeeded", method, url),
                Err(e) => log::debug!("{} {} failed: {}", method, url, e),
            }
        }
        result
    }
}

/// Parse a response body. An empty body is `Value::Null`.
fn parse_body(method: Method, path: &str, text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| {
        Error::unexpected_response(method, path, format!("body is not valid JSON: {e}"))
    })
}

fn transport_error(method: Method, path: &str, err: ureq::Error) -> Error {
    match err {
        ureq::Error::StatusCode(code) => {
            Error::transport(method, path, format!("HTTP {}", code), Some(code))
        }
        other => Error::transport(method, path, other.to_string(), None),
    }
}
