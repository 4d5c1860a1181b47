//! Error types for the FFI layer
//!
//! Flat and cross-language friendly: every variant carries plain strings so
//! Kotlin and Swift can show them without further mapping.

use std::fmt;

use chat2desk_bridge::{BridgeError, SdkError};

/// Error returned to the host (and by host-implemented callbacks)
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ChatBridgeError {
    #[error("Invalid parameter: {field} - {msg}")]
    InvalidParameter { field: String, msg: String },

    #[error("Chat client is not initialized")]
    NotInitialized,

    /// Failure reported by the native chat SDK
    #[error("SDK error: {msg}")]
    Sdk { msg: String },

    #[error("Serialization error: {msg}")]
    Serialization { msg: String },

    /// The host side of a callback failed unexpectedly
    #[error("Callback error: {reason}")]
    Callback { reason: String },
}

impl ChatBridgeError {
    /// Create an SDK error; native client implementations return this
    pub fn sdk<T: fmt::Display>(msg: T) -> Self {
        let msg = msg.to_string();
        tracing::error!("SDK error: {}", msg);
        Self::Sdk { msg }
    }

    pub fn invalid_parameter(field: &str, msg: &str) -> Self {
        tracing::error!("Invalid parameter {}: {}", field, msg);
        Self::InvalidParameter {
            field: field.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Marker passed as the first argument of `DeferredResult::reject`
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::Sdk { .. } | Self::Callback { .. } => "ERROR",
            Self::Serialization { .. } => "SERIALIZATION",
        }
    }
}

/// Never leave the host with an empty message to show
fn ensure_non_empty(s: String, fallback: &'static str) -> String {
    if s.trim().is_empty() {
        fallback.to_string()
    } else {
        s
    }
}

impl From<BridgeError> for ChatBridgeError {
    fn from(error: BridgeError) -> Self {
        match error {
            BridgeError::InvalidParameter { field, msg } => Self::InvalidParameter { field, msg },
            BridgeError::NotInitialized => Self::NotInitialized,
            BridgeError::Sdk(e) => Self::from(e),
            BridgeError::Serialization(msg) => Self::Serialization { msg },
        }
    }
}

impl From<SdkError> for ChatBridgeError {
    fn from(error: SdkError) -> Self {
        let msg = match error {
            SdkError::Call(msg) | SdkError::Stream(msg) | SdkError::Unavailable(msg) => msg,
        };
        Self::Sdk {
            msg: ensure_non_empty(msg, "SDK call failed"),
        }
    }
}

/// Errors crossing back from host callbacks into the core
impl From<ChatBridgeError> for SdkError {
    fn from(error: ChatBridgeError) -> Self {
        match error {
            ChatBridgeError::Sdk { msg } => SdkError::Call(msg),
            ChatBridgeError::Callback { reason } => SdkError::Unavailable(reason),
            other => SdkError::call(other),
        }
    }
}

impl From<uniffi::UnexpectedUniFFICallbackError> for ChatBridgeError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        tracing::error!("Unexpected callback error: {}", error.reason);
        Self::Callback {
            reason: ensure_non_empty(error.reason, "callback failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_their_codes() {
        let cases = [
            (BridgeError::missing("token"), "INVALID_PARAMETER"),
            (BridgeError::NotInitialized, "NOT_INITIALIZED"),
            (BridgeError::Sdk(SdkError::call("offline")), "ERROR"),
            (BridgeError::Serialization("bad".into()), "SERIALIZATION"),
        ];
        for (core, code) in cases {
            assert_eq!(core.code(), code);
            assert_eq!(ChatBridgeError::from(core).code(), code);
        }
    }

    #[test]
    fn sdk_message_never_empty() {
        let err = ChatBridgeError::from(SdkError::Call("  ".into()));
        assert_eq!(err.to_string(), "SDK error: SDK call failed");
    }

    #[test]
    fn host_errors_map_back_to_sdk_errors() {
        assert_eq!(
            SdkError::from(ChatBridgeError::Sdk { msg: "offline".into() }),
            SdkError::Call("offline".into())
        );
        assert_eq!(
            SdkError::from(ChatBridgeError::Callback { reason: "crash".into() }),
            SdkError::Unavailable("crash".into())
        );
    }
}
