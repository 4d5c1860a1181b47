//! Chat2Desk FFI - UniFFI bindings for the Chat2Desk bridge
//!
//! Generates Kotlin (Android) and Swift (iOS) bindings. The host supplies the
//! vendor SDK through `NativeClientFactory` / `NativeChatClient` and receives
//! bridged events through `ChatEventListener`; every long-running call settles
//! through a `DeferredResult`.

#![allow(clippy::new_without_default)]

mod config;
mod error;
mod events;
mod helpers;
mod logging;
mod native;
mod sdk;


pub use config::{ChatSettings, ClientSettings, FileReference, LogLevel, UserInfo};
pub use error::ChatBridgeError;
pub use events::{ChatEventListener, ConnectionStatus, DeferredResult};
pub use logging::init_logging;
pub use native::{
    ConnectionFeed, MessageFeed, NativeAttachment, NativeChatClient, NativeClientFactory,
    NativeDeliveryStatus, NativeDirection, NativeMessage, NativeOutboundFile, NativeReadState,
};
pub use sdk::Chat2Desk;

uniffi::setup_scaffolding!();

/// Bridge version string
#[uniffi::export]
pub fn bridge_version() -> String {
    chat2desk_bridge::version::BRIDGE_VERSION.to_string()
}

/// Event names a host may subscribe to
#[uniffi::export]
pub fn supported_events() -> Vec<String> {
    chat2desk_bridge::SUPPORTED_EVENTS
        .iter()
        .map(|name| name.to_string())
        .collect()
}
