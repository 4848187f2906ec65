//! Error types for the codetalk client.
//!
//! Every failure a backend call can produce is converted to [`Error`] at the
//! client boundary; nothing above the client needs to handle a raw transport
//! fault.

use std::error;
use std::fmt;
use std::sync::Arc;

/// The main error type for the codetalk client.
#[derive(Clone, Debug)]
pub enum Error {
    /// The backend answered with a non-success status and no usable reason.
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Human-readable error message.
        message: String,
    },

    /// The backend rejected the request and said why (the `detail` field of
    /// its error body).
    Validation {
        /// The backend's human-readable reason.
        message: String,
    },

    /// The backend could not be reached.
    Connection {
        /// Human-readable error message.
        message: String,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// The request did not complete within the bounded wait.
    Timeout {
        /// Human-readable error message.
        message: String,
        /// Duration of the timeout in seconds.
        duration: Option<f64>,
    },

    /// The response body could not be decoded.
    Serialization {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// HTTP client error that is neither a timeout nor a connect failure.
    HttpClient {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// A URL parsing or manipulation error.
    Url {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<url::ParseError>,
    },
}

impl Error {
    /// Creates a new API error.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a new validation error carrying the backend's reason.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Creates a new connection error.
    pub fn connection(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Connection {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new timeout error.
    pub fn timeout(message: impl Into<String>, duration: Option<f64>) -> Self {
        Error::Timeout {
            message: message.into(),
            duration,
        }
    }

    /// Creates a new serialization error.
    pub fn serialization(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Serialization {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new HTTP client error.
    pub fn http_client(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::HttpClient {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new URL error.
    pub fn url(message: impl Into<String>, source: Option<url::ParseError>) -> Self {
        Error::Url {
            message: message.into(),
            source,
        }
    }

    /// Returns true if this error is an API error.
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    /// Returns true if the backend rejected the request with a reason.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns true if this error is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection { .. })
    }

    /// Returns true if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Returns true if this error is a serialization error.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::Serialization { .. })
    }

    /// Returns true if this error is an HTTP client error.
    pub fn is_http_client(&self) -> bool {
        matches!(self, Error::HttpClient { .. })
    }

    /// Returns true if no response was obtainable at all: the backend was
    /// unreachable, the request timed out, or the transport itself failed.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Error::Connection { .. } | Error::Timeout { .. } | Error::HttpClient { .. }
        )
    }

    /// Returns the human-readable message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            Error::Api { message, .. } => message,
            Error::Validation { message } => message,
            Error::Connection { message, .. } => message,
            Error::Timeout { message, .. } => message,
            Error::Serialization { message, .. } => message,
            Error::HttpClient { message, .. } => message,
            Error::Url { message, .. } => message,
        }
    }

    /// Returns the HTTP status code, if this error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api {
                status_code,
                message,
            } => {
                write!(f, "API error ({status_code}): {message}")
            }
            Error::Validation { message } => {
                write!(f, "Validation error: {message}")
            }
            Error::Connection { message, .. } => {
                write!(f, "Connection error: {message}")
            }
            Error::Timeout { message, duration } => {
                if let Some(duration) = duration {
                    write!(f, "Timeout error: {message} ({duration} seconds)")
                } else {
                    write!(f, "Timeout error: {message}")
                }
            }
            Error::Serialization { message, .. } => {
                write!(f, "Serialization error: {message}")
            }
            Error::HttpClient { message, .. } => {
                write!(f, "HTTP client error: {message}")
            }
            Error::Url { message, .. } => {
                write!(f, "URL error: {message}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Connection { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Serialization { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::HttpClient { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Url { source, .. } => {
                source.as_ref().map(|e| e as &(dyn error::Error + 'static))
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(format!("JSON error: {err}"), Some(Box::new(err)))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::url(format!("URL parse error: {err}"), Some(err))
    }
}

/// A specialized Result type for codetalk operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formatting() {
        let err = Error::validation("not a git repo");
        assert_eq!(err.to_string(), "Validation error: not a git repo");

        let err = Error::api(500, "backend request failed with status 500");
        assert_eq!(
            err.to_string(),
            "API error (500): backend request failed with status 500"
        );

        let err = Error::timeout("request timed out", Some(60.0));
        assert_eq!(err.to_string(), "Timeout error: request timed out (60 seconds)");
    }

    #[test]
    fn predicates() {
        assert!(Error::validation("bad").is_validation());
        assert!(!Error::validation("bad").is_connectivity());

        assert!(Error::connection("refused", None).is_connection());
        assert!(Error::connection("refused", None).is_connectivity());
        assert!(Error::timeout("slow", None).is_connectivity());
        assert!(Error::http_client("broken", None).is_connectivity());

        assert!(!Error::api(500, "oops").is_connectivity());
        assert!(!Error::serialization("bad json", None).is_connectivity());
    }

    #[test]
    fn message_passthrough() {
        let err = Error::validation("not a git repo");
        assert_eq!(err.message(), "not a git repo");

        let err = Error::connection("connect error", None);
        assert_eq!(err.message(), "connect error");
    }

    #[test]
    fn status_code_only_on_api() {
        assert_eq!(Error::api(400, "bad").status_code(), Some(400));
        assert_eq!(Error::validation("bad").status_code(), None);
    }
}
