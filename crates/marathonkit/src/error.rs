//! Error types for reconciliation runs.
//!
//! Errors are categorized so the CLI can print a short explanation and a hint
//! for the operator. The core never retries; every error ends the run.

use crate::types::Method;
use std::fmt;

/// Result type alias for marathonkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of reconciliation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A group or app definition could not be understood.
    Document,
    /// The orchestrator could not be reached or rejected a request.
    Network,
    /// The orchestrator answered with something other than what was expected.
    Response,
    /// Other/unknown errors.
    Other,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Document => "Invalid group definition",
            Self::Network => "Marathon request failed",
            Self::Response => "Unexpected Marathon response",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Document => "Every group and app definition needs a string \"id\" field",
            Self::Network => "Check the Marathon address and that the API is reachable",
            Self::Response => "Verify the address points at a Marathon v2 API",
            Self::Other => "Check the error details for more information",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while reconciling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A group or app document is missing its `id` or has the wrong shape.
    #[error("malformed group document: {0}")]
    MalformedGroupDocument(String),

    /// A group document is not valid JSON.
    #[error("invalid group JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A request to the orchestrator failed at the network level or returned
    /// a non-success status.
    #[error("{method} {path} failed: {message}")]
    Transport {
        /// HTTP method of the failed request.
        method: Method,
        /// Request path relative to the orchestrator base address.
        path: String,
        /// Error message.
        message: String,
        /// HTTP status code if available.
        status: Option<u16>,
    },

    /// The orchestrator's response did not have the expected shape.
    #[error("unexpected response to {method} {path}: {message}")]
    UnexpectedResponseShape {
        /// HTTP method of the request.
        method: Method,
        /// Request path relative to the orchestrator base address.
        path: String,
        /// What was wrong with the body.
        message: String,
    },

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a malformed-document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedGroupDocument(message.into())
    }

    /// Create a transport error.
    pub fn transport(
        method: Method,
        path: impl Into<String>,
        message: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        Self::Transport {
            method,
            path: path.into(),
            message: message.into(),
            status,
        }
    }

    /// Create an unexpected-response error.
    pub fn unexpected_response(
        method: Method,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::UnexpectedResponseShape {
            method,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::MalformedGroupDocument(_) | Error::InvalidJson(_) => ErrorCategory::Document,
            Error::Transport { .. } => ErrorCategory::Network,
            Error::UnexpectedResponseShape { .. } => ErrorCategory::Response,
            Error::Other(_) => ErrorCategory::Other,
        }
    }

    /// HTTP status code, if the orchestrator answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_description() {
        assert!(!ErrorCategory::Document.description().is_empty());
        assert!(!ErrorCategory::Network.description().is_empty());
        assert!(!ErrorCategory::Response.description().is_empty());
        assert!(!ErrorCategory::Other.description().is_empty());
    }

    #[test]
    fn test_error_category_advice() {
        assert!(ErrorCategory::Document.advice().contains("id"));
        assert!(!ErrorCategory::Network.advice().is_empty());
    }

    #[test]
    fn test_error_category_display() {
        let display = format!("{}", ErrorCategory::Network);
        assert!(display.contains("Marathon"));
    }

    #[test]
    fn test_transport_error_display() {
        let err = Error::transport(Method::Delete, "/v2/apps/app2", "HTTP 500", Some(500));
        assert_eq!(err.to_string(), "DELETE /v2/apps/app2 failed: HTTP 500");
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_unexpected_response_category() {
        let err = Error::unexpected_response(Method::Get, "/v2/apps", "missing \"apps\" array");
        assert_eq!(err.category(), ErrorCategory::Response);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_document_errors_category() {
        assert_eq!(
            Error::malformed("group is missing \"id\"").category(),
            ErrorCategory::Document
        );

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(Error::from(json_err).category(), ErrorCategory::Document);
    }
}
