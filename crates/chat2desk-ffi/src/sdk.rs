//! The `Chat2Desk` object hosts hold on to
//!
//! Deferred methods hand their work to the shared runtime and return
//! immediately; the outcome reaches the host through `DeferredResult`.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info};

use chat2desk_bridge::{ChatBridge, RawSettings};

use crate::config::{ChatSettings, FileReference, UserInfo};
use crate::error::ChatBridgeError;
use crate::events::{settle, ChatEventListener, ConnectionStatus, DeferredResult, ListenerSink};
use crate::helpers::get_runtime;
use crate::native::{ForeignFactory, NativeClientFactory};

/// Chat2Desk bridge entry point
#[derive(uniffi::Object)]
pub struct Chat2Desk {
    bridge: Arc<ChatBridge>,
    listener: ListenerSink,
}

macro_rules! ffi_log {
    ($name:expr) => {
        debug!("chat2desk->{}()", $name);
    };
}

impl Chat2Desk {
    /// Run `job` on the shared runtime and settle `deferred` with its result
    fn defer<F, Fut>(&self, deferred: Box<dyn DeferredResult>, job: F)
    where
        F: FnOnce(Arc<ChatBridge>) -> Fut,
        Fut: Future<Output = chat2desk_bridge::Result<String>> + Send + 'static,
    {
        let fut = job(self.bridge.clone());
        get_runtime().spawn(async move {
            settle(deferred, fut.await);
        });
    }
}

#[uniffi::export]
impl Chat2Desk {
    #[uniffi::constructor]
    pub fn new(factory: Arc<dyn NativeClientFactory>) -> Self {
        ffi_log!("new");
        let listener = ListenerSink::default();
        let bridge = ChatBridge::new(
            Arc::new(ForeignFactory::new(factory)),
            Arc::new(listener.clone()),
        );
        Self {
            bridge: Arc::new(bridge),
            listener,
        }
    }

    /// Set the listener that receives `onMessage` and `connection_status`
    pub fn set_event_listener(&self, listener: Box<dyn ChatEventListener>) {
        ffi_log!("set_event_listener");
        self.listener.set(listener);
        info!("✅ Event listener set");
    }

    pub fn remove_event_listener(&self) {
        ffi_log!("remove_event_listener");
        self.listener.clear();
        info!("Event listener removed");
    }

    /// Build and install the SDK client
    pub fn init_chat(&self, settings: ChatSettings) -> Result<(), ChatBridgeError> {
        ffi_log!("init_chat");
        Ok(self.bridge.init_chat(RawSettings::from(settings))?)
    }

    /// `init_chat` taking the settings object as JSON
    pub fn init_chat_json(&self, json: String) -> Result<(), ChatBridgeError> {
        ffi_log!("init_chat_json");
        Ok(self.bridge.init_chat_json(&json)?)
    }

    pub fn open_chat(&self, deferred: Box<dyn DeferredResult>) {
        ffi_log!("open_chat");
        self.defer(deferred, |bridge| async move { bridge.open_chat().await });
    }

    pub fn close_chat(&self, deferred: Box<dyn DeferredResult>) {
        ffi_log!("close_chat");
        self.defer(deferred, |bridge| async move { bridge.close_chat().await });
    }

    pub fn destroy_chat(&self, deferred: Box<dyn DeferredResult>) {
        ffi_log!("destroy_chat");
        self.defer(deferred, |bridge| async move { bridge.destroy_chat().await });
    }

    pub fn send_message(&self, text: String, deferred: Box<dyn DeferredResult>) {
        ffi_log!("send_message");
        self.defer(deferred, |bridge| async move { bridge.send_message(text).await });
    }

    pub fn send_file(&self, file: FileReference, deferred: Box<dyn DeferredResult>) {
        ffi_log!("send_file");
        self.defer(deferred, |bridge| async move {
            bridge.send_file(file.into()).await
        });
    }

    pub fn send_user_info(&self, info: UserInfo, deferred: Box<dyn DeferredResult>) {
        ffi_log!("send_user_info");
        self.defer(deferred, |bridge| async move {
            bridge.send_user_info(info.into()).await
        });
    }

    pub fn fetch_new_messages(&self, deferred: Box<dyn DeferredResult>) {
        ffi_log!("fetch_new_messages");
        self.defer(deferred, |bridge| async move { bridge.fetch_new_messages().await });
    }

    pub fn is_initialized(&self) -> bool {
        self.bridge.is_initialized()
    }

    /// Last connection state seen on the SDK stream
    pub fn connection_state(&self) -> ConnectionStatus {
        self.bridge.connection_state().into()
    }
}
