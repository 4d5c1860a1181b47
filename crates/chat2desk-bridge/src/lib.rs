//! Chat2Desk bridge core
//!
//! Translates host calls into calls on the Chat2Desk customer-chat SDK and
//! the SDK's update streams into named host events:
//! - lifecycle: create/replace/release the one SDK client, start and stop the session
//! - commands: send text, send a file, send the client profile, fetch new messages
//! - stream bridge: forward message and connection-state streams as events
//! - transcoding: SDK records to flat, serialisable host records
//!
//! The SDK itself sits behind the [`ChatSdk`] trait and stays opaque.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chat2desk_bridge::{ChatBridge, ClientFactory, EventSink, RawSettings};
//!
//! async fn run(factory: Arc<dyn ClientFactory>, sink: Arc<dyn EventSink>) -> chat2desk_bridge::Result<()> {
//!     let bridge = ChatBridge::new(factory, sink);
//!     bridge.init_chat_json(r#"{"token":"t","baseHost":"b","wsHost":"w","storageHost":"s"}"#)?;
//!     bridge.open_chat().await?;
//!     bridge.send_message("Hello".to_string()).await?;
//!     bridge.close_chat().await?;
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod chat;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod model;
pub mod sdk;
pub mod subscription;
pub mod transcode;
pub mod version;

#[cfg(test)]
mod test_support;


pub use bridge::StreamBridge;
pub use chat::ChatBridge;
pub use commands::UserInfo;
pub use config::{LogLevel, RawSettings, Settings, SettingsBuilder};
pub use error::{BridgeError, Result, SdkError, SdkResult};
pub use events::{EventSink, HostEvent, CONNECTION_STATUS, ON_MESSAGE, SUPPORTED_EVENTS};
pub use model::{
    Attachment, ConnectionState, DeliveryStatus, Direction, LocalResource, Message, OutboundFile,
    ReadState,
};
pub use sdk::{ChatSdk, ClientFactory, ConnectionStream, MessageStream};
pub use subscription::Subscription;
pub use transcode::{AttachmentRecord, FileReference, MessageRecord};
