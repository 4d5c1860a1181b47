//! Error types for the bridge core
//!
//! `SdkError` is whatever the wrapped chat SDK reports; the bridge never
//! inspects it beyond logging. `BridgeError` is what a host command settles
//! with when it fails.

use std::fmt;

/// Failure reported by the external chat SDK
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// An SDK method call failed
    #[error("SDK call failed: {0}")]
    Call(String),

    /// An SDK update stream ended with an error
    #[error("SDK stream failed: {0}")]
    Stream(String),

    /// The SDK handle could not be reached (e.g. its worker panicked)
    #[error("SDK unavailable: {0}")]
    Unavailable(String),
}

impl SdkError {
    pub fn call<T: fmt::Display>(msg: T) -> Self {
        Self::Call(msg.to_string())
    }

    pub fn stream<T: fmt::Display>(msg: T) -> Self {
        Self::Stream(msg.to_string())
    }
}

pub type SdkResult<T> = std::result::Result<T, SdkError>;

/// Error a host command is rejected with
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Invalid parameter: {field} - {msg}")]
    InvalidParameter { field: String, msg: String },

    #[error("Chat client is not initialized")]
    NotInitialized,

    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BridgeError {
    /// Create an invalid parameter error
    pub fn invalid_parameter<T: fmt::Display>(field: &str, msg: T) -> Self {
        let msg = msg.to_string();
        tracing::warn!("Invalid parameter {}: {}", field, msg);
        Self::InvalidParameter {
            field: field.to_string(),
            msg,
        }
    }

    /// Shorthand for a required field the host did not supply
    pub fn missing(field: &str) -> Self {
        Self::invalid_parameter(field, "required field is missing")
    }

    /// Stable marker handed to the host when a deferred result is rejected
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::Sdk(_) => "ERROR",
            Self::Serialization(_) => "SERIALIZATION",
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
