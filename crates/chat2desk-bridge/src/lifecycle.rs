//! Client lifecycle: create, start, stop, release
//!
//! Only these operations touch the client slot. The slot is a single-writer
//! mutex, so concurrent `init_chat` calls serialise and the last one wins.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::chat::ChatBridge;
use crate::config::{RawSettings, Settings};
use crate::error::Result;
use crate::model::ConnectionState;
use crate::sdk::ChatSdk;

pub const START_OK: &str = "Success start";
pub const STOP_OK: &str = "Success stop";
pub const DESTROY_OK: &str = "Success destroy";

/// Holder of the one live SDK client
#[derive(Default)]
pub struct ClientSlot {
    inner: Mutex<Option<Arc<dyn ChatSdk>>>,
}

impl ClientSlot {
    pub fn current(&self) -> Option<Arc<dyn ChatSdk>> {
        self.inner.lock().clone()
    }

    /// Install `client`, returning whatever was installed before
    pub fn replace(&self, client: Arc<dyn ChatSdk>) -> Option<Arc<dyn ChatSdk>> {
        self.inner.lock().replace(client)
    }

    pub fn take(&self) -> Option<Arc<dyn ChatSdk>> {
        self.inner.lock().take()
    }

    /// Whether `client` is still the installed instance
    pub fn holds(&self, client: &Arc<dyn ChatSdk>) -> bool {
        self.inner
            .lock()
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, client))
    }
}

impl ChatBridge {
    /// Build and install an SDK client from host settings
    ///
    /// Rejects without touching the installed client when a required field
    /// is missing. A previously installed client is dropped without being
    /// stopped; subscriptions bound to it are cancelled.
    pub fn init_chat(&self, raw: RawSettings) -> Result<()> {
        let settings = Settings::try_from(raw)?;
        debug!(
            "Creating chat client: base_host={}, ws_host={}, storage_host={}",
            settings.base_host, settings.ws_host, settings.storage_host
        );

        let client = self.factory.create(&settings).map_err(|e| {
            error!("Failed to create chat client: {}", e);
            e
        })?;

        if self.slot.replace(client).is_some() {
            warn!("Replacing existing chat client without teardown");
            self.streams.stop_all();
        }
        info!("✅ Chat client initialized");
        Ok(())
    }

    /// `init_chat` for the JSON blob the scripting layer passes
    pub fn init_chat_json(&self, json: &str) -> Result<()> {
        self.init_chat(RawSettings::from_json(json)?)
    }

    /// Start the session and arm both stream subscriptions
    ///
    /// Subscriptions are (re-)armed only when the cached connection state is
    /// not already `Connected`.
    pub async fn open_chat(&self) -> Result<String> {
        let client = self.client()?;
        let status = client.start().await.map_err(|e| {
            error!("Failed to start chat: {}", e);
            e
        })?;

        if !self.slot.holds(&client) {
            warn!("Chat client replaced while starting, not subscribing");
        } else if self.streams.connection_state() == ConnectionState::Connected {
            debug!("Already connected, keeping current subscriptions");
        } else {
            self.streams.watch_connection(&client);
            self.streams.watch_messages(&client);
        }

        info!("✅ Chat started");
        Ok(status.unwrap_or_else(|| START_OK.to_string()))
    }

    /// Stop the session and release the client
    pub async fn close_chat(&self) -> Result<String> {
        self.teardown().await?;
        Ok(STOP_OK.to_string())
    }

    /// Same teardown as `close_chat`, kept as a separate host entry point
    pub async fn destroy_chat(&self) -> Result<String> {
        self.teardown().await?;
        Ok(DESTROY_OK.to_string())
    }

    async fn teardown(&self) -> Result<()> {
        let Some(client) = self.slot.take() else {
            debug!("No chat client, nothing to close");
            return Ok(());
        };
        self.streams.stop_all();

        let stopped = client.stop().await;
        if let Err(e) = &stopped {
            error!("Failed to stop chat: {}", e);
        }
        let closed = client.close().await;
        if let Err(e) = &closed {
            error!("Failed to close chat client: {}", e);
        }
        stopped.and(closed)?;

        info!("✅ Chat client released");
        Ok(())
    }
}
