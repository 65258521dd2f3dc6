//! Error types for host communication.

use thiserror::Error;

/// Errors that can occur while talking to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, TLS.
    #[error("network error: {0}")]
    Network(String),

    /// The host answered with an error body or a failing status.
    #[error("host error: {message}")]
    Server {
        /// Message reported by the host.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("could not decode host response: {0}")]
    Decode(String),

    /// Client configuration is incomplete or invalid.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the host. Please check that it is running.",
            Self::Server { message } => message,
            Self::Decode(_) => "The host sent a response that could not be understood.",
            Self::Config(_) => "The connection settings are incomplete.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub(crate) fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for host operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = ClientError::Network("connection refused".to_string());
        assert!(err.user_message().contains("reach the host"));

        let err = ClientError::server("No SNAC schema provided.");
        assert_eq!(err.user_message(), "No SNAC schema provided.");
    }

    #[test]
    fn test_retryable() {
        assert!(ClientError::Network("timeout".to_string()).is_retryable());
        assert!(!ClientError::server("bad schema").is_retryable());
        assert!(!ClientError::Decode("eof".to_string()).is_retryable());
    }
}
