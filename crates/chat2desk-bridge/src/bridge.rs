//! Stream-to-event bridge
//!
//! Owns at most one consumer per SDK stream. Each consumer transcodes every
//! update and hands it to the host's `EventSink` in arrival order. A stream
//! error is logged and ends that consumer; nothing restarts it automatically.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::StreamExt;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info};

use crate::events::{EventSink, HostEvent};
use crate::model::ConnectionState;
use crate::sdk::{ChatSdk, ConnectionStream, MessageStream};
use crate::subscription::Subscription;
use crate::transcode::message_records;

/// Last connection state, writable only by the current connection consumer
///
/// Each `watch_connection` starts a new generation; `reset` ends it. A
/// consumer from an older generation that is still draining after `abort()`
/// cannot overwrite the cache.
#[derive(Default)]
pub struct StateCache {
    state: RwLock<ConnectionState>,
    generation: AtomicU64,
}

impl StateCache {
    /// Start a new generation and return its token
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Store `state` if `generation` is still current
    pub fn set_if_current(&self, generation: u64, state: ConnectionState) -> bool {
        let mut guard = self.state.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *guard = state;
        true
    }

    /// End the current generation and forget the state
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.write() = ConnectionState::Closed;
    }

    pub fn get(&self) -> ConnectionState {
        *self.state.read()
    }
}

pub struct StreamBridge {
    sink: Arc<dyn EventSink>,
    messages: Mutex<Option<Subscription>>,
    connection: Mutex<Option<Subscription>>,
    /// Last state seen on the connection stream
    last_state: Arc<StateCache>,
}

impl StreamBridge {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink,
            messages: Mutex::new(None),
            connection: Mutex::new(None),
            last_state: Arc::new(StateCache::default()),
        }
    }

    /// (Re-)subscribe to the client's message stream
    ///
    /// Must be called from within a Tokio runtime.
    pub fn watch_messages(&self, client: &Arc<dyn ChatSdk>) {
        let mut slot = self.messages.lock();
        if let Some(previous) = slot.take() {
            previous.cancel();
        }
        let stream = client.messages();
        *slot = Some(Subscription::spawn(
            "messages",
            forward_messages(stream, self.sink.clone()),
        ));
    }

    /// (Re-)subscribe to the client's connection-state stream
    ///
    /// Must be called from within a Tokio runtime.
    pub fn watch_connection(&self, client: &Arc<dyn ChatSdk>) {
        let mut slot = self.connection.lock();
        if let Some(previous) = slot.take() {
            previous.cancel();
        }
        let stream = client.connection_status();
        let generation = self.last_state.begin();
        *slot = Some(Subscription::spawn(
            "connection",
            forward_connection(stream, self.sink.clone(), self.last_state.clone(), generation),
        ));
    }

    pub fn stop_messages(&self) {
        if let Some(subscription) = self.messages.lock().take() {
            subscription.cancel();
        }
    }

    pub fn stop_connection(&self) {
        if let Some(subscription) = self.connection.lock().take() {
            subscription.cancel();
        }
    }

    /// Cancel both consumers and forget the cached connection state
    pub fn stop_all(&self) {
        self.stop_messages();
        self.stop_connection();
        self.last_state.reset();
    }

    pub fn is_messages_active(&self) -> bool {
        self.messages
            .lock()
            .as_ref()
            .is_some_and(|s| !s.is_finished())
    }

    pub fn is_connection_active(&self) -> bool {
        self.connection
            .lock()
            .as_ref()
            .is_some_and(|s| !s.is_finished())
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.last_state.get()
    }
}

async fn forward_messages(mut stream: MessageStream, sink: Arc<dyn EventSink>) {
    while let Some(update) = stream.next().await {
        match update {
            Ok(messages) => {
                debug!("Forwarding {} message(s) to host", messages.len());
                sink.emit(HostEvent::Messages {
                    messages: message_records(&messages),
                });
            }
            Err(e) => {
                error!("Message subscription failed: {}", e);
                return;
            }
        }
    }
    info!("Message stream completed");
}

async fn forward_connection(
    mut stream: ConnectionStream,
    sink: Arc<dyn EventSink>,
    last_state: Arc<StateCache>,
    generation: u64,
) {
    while let Some(update) = stream.next().await {
        match update {
            Ok(state) => {
                if !last_state.set_if_current(generation, state) {
                    debug!("Dropping stale connection state {}", state);
                    return;
                }
                debug!("Connection state -> {}", state);
                sink.emit(HostEvent::ConnectionStatus {
                    connection: state.as_str().to_string(),
                });
            }
            Err(e) => {
                error!("Connection subscription failed: {}", e);
                return;
            }
        }
    }
    info!("Connection stream completed");
}
