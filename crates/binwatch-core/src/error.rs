//! Error types for the Binwatch client.

use thiserror::Error;

/// A shared error type for the entire Binwatch client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug)]
pub enum BinwatchError {
    /// Non-success HTTP status from the backend, with the raw response body
    #[error("HTTP error! status: {status}, message: {body}")]
    Http { status: u16, body: String },

    /// Network/connection failure or response decode failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error outside the HTTP path
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", etc.
        message: String,
    },

    /// Required platform capability (geolocation) unavailable or failed
    #[error("Capability error: {0}")]
    Capability(String),

    /// IO error (session store file operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Malformed session material (e.g. login response with token but no user)
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BinwatchError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Http error from a status code and response body.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Capability error
    pub fn capability(message: impl Into<String>) -> Self {
        Self::Capability(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Session error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Http error
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a Capability error
    pub fn is_capability(&self) -> bool {
        matches!(self, Self::Capability(_))
    }

    /// Check if this is a Session error
    pub fn is_session(&self) -> bool {
        matches!(self, Self::Session(_))
    }

    /// Returns the HTTP status code if this is an Http error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for BinwatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for BinwatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// Every reqwest failure (connect, body read, JSON decode) is a transport
/// failure from the caller's point of view; status errors are mapped to
/// `Http` before this conversion can apply.
impl From<reqwest::Error> for BinwatchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// A type alias for `Result<T, BinwatchError>`.
pub type Result<T> = std::result::Result<T, BinwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message_contains_status_and_body() {
        let err = BinwatchError::http(404, "not found");
        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(BinwatchError::http(500, "boom").status(), Some(500));
        assert_eq!(BinwatchError::transport("offline").status(), None);
    }

    #[test]
    fn test_predicates() {
        assert!(BinwatchError::http(400, "").is_http());
        assert!(BinwatchError::transport("x").is_transport());
        assert!(BinwatchError::capability("x").is_capability());
        assert!(BinwatchError::session("x").is_session());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: BinwatchError = err.into();
        assert!(matches!(
            converted,
            BinwatchError::Serialization { format, .. } if format == "JSON"
        ));
    }
}
