//! Callback interfaces the host implements, and the sink that feeds them

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, warn};

use chat2desk_bridge::{ConnectionState, EventSink, HostEvent};

use crate::error::ChatBridgeError;

/// Receives bridged SDK events
///
/// Called on a background thread, one event at a time per stream.
/// `payload_json` is the serialised event body, e.g.
/// `{"messages":[...]}` for `onMessage`.
#[uniffi::export(callback_interface)]
pub trait ChatEventListener: Send + Sync {
    fn on_event(&self, name: String, payload_json: String);
}

/// One-shot outcome of a deferred host call
///
/// Exactly one of the two methods is called, exactly once.
#[uniffi::export(callback_interface)]
pub trait DeferredResult: Send + Sync {
    fn resolve(&self, value: Option<String>);

    fn reject(&self, code: String, message: String);
}

/// Settle `deferred` from a core result
pub(crate) fn settle<T, E>(deferred: Box<dyn DeferredResult>, result: Result<T, E>)
where
    T: Into<Option<String>>,
    E: Into<ChatBridgeError>,
{
    match result {
        Ok(value) => deferred.resolve(value.into()),
        Err(e) => {
            let e = e.into();
            deferred.reject(e.code().to_string(), e.to_string());
        }
    }
}

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ConnectionStatus {
    Closed,
    Connecting,
    Connected,
    Reconnecting,
    Failed,
}

impl From<ConnectionState> for ConnectionStatus {
    fn from(state: ConnectionState) -> Self {
        match state {
            ConnectionState::Closed => Self::Closed,
            ConnectionState::Connecting => Self::Connecting,
            ConnectionState::Connected => Self::Connected,
            ConnectionState::Reconnecting => Self::Reconnecting,
            ConnectionState::Failed => Self::Failed,
        }
    }
}

impl From<ConnectionStatus> for ConnectionState {
    fn from(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::Closed => Self::Closed,
            ConnectionStatus::Connecting => Self::Connecting,
            ConnectionStatus::Connected => Self::Connected,
            ConnectionStatus::Reconnecting => Self::Reconnecting,
            ConnectionStatus::Failed => Self::Failed,
        }
    }
}

/// `EventSink` that serialises events and hands them to the host listener
///
/// Events arriving while no listener is set are dropped. The lock is never
/// held across `on_event`, so a listener may replace or remove itself from
/// inside the callback.
#[derive(Clone, Default)]
pub(crate) struct ListenerSink {
    listener: Arc<RwLock<Option<Arc<dyn ChatEventListener>>>>,
}

impl ListenerSink {
    pub fn set(&self, listener: Box<dyn ChatEventListener>) {
        *self.listener.write() = Some(Arc::from(listener));
    }

    pub fn clear(&self) {
        self.listener.write().take();
    }

    fn current(&self) -> Option<Arc<dyn ChatEventListener>> {
        self.listener.read().clone()
    }
}

impl EventSink for ListenerSink {
    fn emit(&self, event: HostEvent) {
        let payload = match event.payload_json() {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to serialise {} event: {}", event.name(), e);
                return;
            }
        };

        match self.current() {
            Some(listener) => {
                debug!("Dispatching {} to host", event.name());
                listener.on_event(event.name().to_string(), payload);
            }
            None => warn!("No event listener set, dropping {}", event.name()),
        }
    }
}
