//! The bridge object hosts hold on to
//!
//! Lifecycle operations live in `lifecycle.rs`, outbound commands in
//! `commands.rs`; both are `impl ChatBridge` blocks over the state defined
//! here.

use std::sync::Arc;

use crate::bridge::StreamBridge;
use crate::error::{BridgeError, Result};
use crate::events::EventSink;
use crate::lifecycle::ClientSlot;
use crate::model::ConnectionState;
use crate::sdk::{ChatSdk, ClientFactory};

pub struct ChatBridge {
    pub(crate) factory: Arc<dyn ClientFactory>,
    pub(crate) slot: ClientSlot,
    pub(crate) streams: StreamBridge,
}

impl ChatBridge {
    pub fn new(factory: Arc<dyn ClientFactory>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            factory,
            slot: ClientSlot::default(),
            streams: StreamBridge::new(sink),
        }
    }

    /// Whether an SDK client is currently installed
    pub fn is_initialized(&self) -> bool {
        self.slot.current().is_some()
    }

    /// Last connection state observed on the SDK stream
    pub fn connection_state(&self) -> ConnectionState {
        self.streams.connection_state()
    }

    pub fn streams(&self) -> &StreamBridge {
        &self.streams
    }

    pub(crate) fn client(&self) -> Result<Arc<dyn ChatSdk>> {
        self.slot.current().ok_or(BridgeError::NotInitialized)
    }
}
