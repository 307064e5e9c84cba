use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the ACP client
#[derive(Error, Debug)]
pub enum Error {
    /// The server returned 404 for a get-by-id
    #[error("policy or role not found")]
    NotFound,

    /// The server returned a decodable structured error body
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A status code not explicitly handled for the operation
    #[error("unexpected status {status}")]
    UnexpectedStatus { status: u16, body: String },

    /// The server's reported version is outside the supported range
    #[error("got {reported}, requires >={required}")]
    IncompatibleServer { reported: String, required: String },

    /// The server's reported version is not valid semantic-version syntax
    #[error("invalid server version: {0}")]
    Version(#[from] semver::Error),

    /// Response body present but not valid JSON or not the expected shape
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// Connection failure, timeout, or open circuit
    #[error("transport error: {0}")]
    Transport(String),

    /// Client construction failure
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Structured error payload returned by the ACP engine on failure.
///
/// Field names follow the engine's wire format; all fields but `code` may be
/// absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub code: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub request: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.code)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(details) = &self.details {
            write!(f, " {}", details)?;
        }
        if !self.reason.is_empty() {
            write!(f, ": {}", self.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_error_display() {
        let err = ServiceError { code: 500, message: "internal error".to_string(), ..Default::default() };
        assert_eq!(err.to_string(), "[500]: internal error");

        let err = ServiceError {
            code: 500,
            message: "internal error".to_string(),
            reason: "database unreachable".to_string(),
            details: Some(json!({"field": "dsn"})),
            ..Default::default()
        };
        assert_eq!(err.to_string(), r#"[500]: internal error {"field":"dsn"}: database unreachable"#);
    }

    #[test]
    fn test_service_error_decodes_partial_body() {
        let err: ServiceError =
            serde_json::from_str(r#"{"code":500,"message":"boom"}"#).unwrap();
        assert_eq!(err.code, 500);
        assert_eq!(err.message, "boom");
        assert!(err.reason.is_empty());
        assert!(err.details.is_none());
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotFound;
        assert!(err.to_string().contains("not found"));

        let err = Error::UnexpectedStatus { status: 418, body: String::new() };
        assert!(err.to_string().contains("418"));

        let err = Error::IncompatibleServer {
            reported: "v0.2.1".to_string(),
            required: "0.3.0".to_string(),
        };
        assert!(err.to_string().starts_with("got v0.2.1"));

        let err = Error::Transport("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));

        let err = Error::Config("base URL is not valid".to_string());
        assert!(err.to_string().contains("configuration error"));
    }
}
