//! Surface of the external chat SDK the bridge drives
//!
//! The SDK is a black box: transport, auth refresh, persistence and retries
//! all live behind this trait. Platform layers implement it around the
//! vendor library; tests implement it with in-memory doubles.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::config::Settings;
use crate::error::SdkResult;
use crate::model::{ConnectionState, Message, OutboundFile};

/// Unbounded sequence of message-list snapshots
pub type MessageStream = BoxStream<'static, SdkResult<Vec<Message>>>;

/// Unbounded sequence of connection-state transitions
pub type ConnectionStream = BoxStream<'static, SdkResult<ConnectionState>>;

/// One live SDK client
#[async_trait]
pub trait ChatSdk: Send + Sync {
    /// Start the chat session; may return an SDK-defined status string
    async fn start(&self) -> SdkResult<Option<String>>;

    /// Stop the chat session
    async fn stop(&self) -> SdkResult<()>;

    /// Release native resources held by the client
    async fn close(&self) -> SdkResult<()>;

    /// Send a text message, optionally carrying one file
    async fn send_message(&self, text: String, attachment: Option<OutboundFile>) -> SdkResult<()>;

    /// Attach profile data to the current client
    async fn send_client_params(
        &self,
        name: String,
        phone: String,
        fields: HashMap<String, String>,
    ) -> SdkResult<()>;

    /// Ask the SDK to pull messages it has not seen yet
    async fn fetch_new_messages(&self) -> SdkResult<()>;

    /// Subscribe to message snapshots; dropping the stream unsubscribes
    fn messages(&self) -> MessageStream;

    /// Subscribe to connection-state changes; dropping the stream unsubscribes
    fn connection_status(&self) -> ConnectionStream;
}

/// Builds SDK clients from validated settings
pub trait ClientFactory: Send + Sync {
    fn create(&self, settings: &Settings) -> SdkResult<Arc<dyn ChatSdk>>;
}
