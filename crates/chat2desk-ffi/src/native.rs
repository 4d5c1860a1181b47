//! Host-implemented SDK client and its adaptation to the core `ChatSdk`
//!
//! The host wraps the vendor Chat2Desk SDK in a `NativeChatClient`. Its
//! methods are blocking from Rust's point of view, so `ForeignSdk` runs each
//! one on Tokio's blocking pool. Stream updates come back through
//! `MessageFeed` / `ConnectionFeed` objects the host pushes into.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::channel::mpsc::{unbounded, UnboundedSender};
use futures::StreamExt;
use tracing::{debug, error};

use chat2desk_bridge::{
    Attachment, ChatSdk, ClientFactory, ConnectionState, ConnectionStream, DeliveryStatus,
    Direction, LocalResource, Message, MessageStream, OutboundFile, ReadState, SdkError,
    SdkResult, Settings,
};

use crate::config::ClientSettings;
use crate::error::ChatBridgeError;
use crate::events::ConnectionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum NativeReadState {
    Unread,
    Read,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum NativeDeliveryStatus {
    Sending,
    Sent,
    Delivered,
    NotDelivered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum NativeDirection {
    In,
    Out,
}

impl From<NativeReadState> for ReadState {
    fn from(s: NativeReadState) -> Self {
        match s {
            NativeReadState::Unread => ReadState::Unread,
            NativeReadState::Read => ReadState::Read,
        }
    }
}

impl From<NativeDeliveryStatus> for DeliveryStatus {
    fn from(s: NativeDeliveryStatus) -> Self {
        match s {
            NativeDeliveryStatus::Sending => DeliveryStatus::Sending,
            NativeDeliveryStatus::Sent => DeliveryStatus::Sent,
            NativeDeliveryStatus::Delivered => DeliveryStatus::Delivered,
            NativeDeliveryStatus::NotDelivered => DeliveryStatus::NotDelivered,
        }
    }
}

impl From<NativeDirection> for Direction {
    fn from(d: NativeDirection) -> Self {
        match d {
            NativeDirection::In => Direction::In,
            NativeDirection::Out => Direction::Out,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct NativeAttachment {
    pub id: i64,
    pub file_size: u64,
    pub content_type: String,
    pub remote_link: String,
    pub original_file_name: String,
    pub upload_status: NativeDeliveryStatus,
}

/// Message as the vendor SDK reports it
#[derive(Debug, Clone, uniffi::Record)]
pub struct NativeMessage {
    pub id: String,
    pub real_id: i64,
    pub read: NativeReadState,
    pub status: NativeDeliveryStatus,
    pub text: Option<String>,
    pub direction: NativeDirection,
    /// Milliseconds since the Unix epoch
    pub date_millis: Option<i64>,
    pub attachments: Option<Vec<NativeAttachment>>,
}

impl From<NativeAttachment> for Attachment {
    fn from(a: NativeAttachment) -> Self {
        Attachment {
            id: a.id,
            file_size: a.file_size,
            content_type: a.content_type,
            remote_link: a.remote_link,
            original_file_name: a.original_file_name,
            upload_status: a.upload_status.into(),
        }
    }
}

impl From<NativeMessage> for Message {
    fn from(m: NativeMessage) -> Self {
        Message {
            id: m.id,
            real_id: m.real_id,
            read: m.read.into(),
            status: m.status.into(),
            text: m.text,
            direction: m.direction.into(),
            date: m.date_millis.and_then(DateTime::<Utc>::from_timestamp_millis),
            attachments: m
                .attachments
                .map(|list| list.into_iter().map(Attachment::from).collect()),
        }
    }
}

/// File the native SDK should upload with the next message
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NativeOutboundFile {
    /// Path or platform URI, as the native SDK accepts it
    pub uri: String,
    /// True when `uri` is a filesystem path rather than a platform URI
    pub is_path: bool,
    pub original_name: String,
    pub mime_type: String,
    pub file_size: u64,
}

impl From<OutboundFile> for NativeOutboundFile {
    fn from(f: OutboundFile) -> Self {
        NativeOutboundFile {
            uri: f.resource.to_uri_string(),
            is_path: matches!(f.resource, LocalResource::Path(_)),
            original_name: f.original_name,
            mime_type: f.mime_type,
            file_size: f.file_size,
        }
    }
}

/// Push side of the SDK message stream
#[derive(uniffi::Object)]
pub struct MessageFeed {
    tx: UnboundedSender<SdkResult<Vec<Message>>>,
}

#[uniffi::export]
impl MessageFeed {
    /// Forward one message-list snapshot
    ///
    /// Returns false once the bridge has stopped listening; the host should
    /// then drop its collector.
    pub fn push(&self, messages: Vec<NativeMessage>) -> bool {
        let messages = messages.into_iter().map(Message::from).collect();
        self.tx.unbounded_send(Ok(messages)).is_ok()
    }

    /// End the stream with an error
    pub fn fail(&self, reason: String) {
        let _ = self.tx.unbounded_send(Err(SdkError::stream(reason)));
        self.tx.close_channel();
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Push side of the SDK connection-state stream
#[derive(uniffi::Object)]
pub struct ConnectionFeed {
    tx: UnboundedSender<SdkResult<ConnectionState>>,
}

#[uniffi::export]
impl ConnectionFeed {
    /// Forward one state transition; false once the bridge stopped listening
    pub fn push(&self, state: ConnectionStatus) -> bool {
        self.tx.unbounded_send(Ok(state.into())).is_ok()
    }

    pub fn fail(&self, reason: String) {
        let _ = self.tx.unbounded_send(Err(SdkError::stream(reason)));
        self.tx.close_channel();
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The vendor SDK client, implemented by the host
#[uniffi::export(with_foreign)]
pub trait NativeChatClient: Send + Sync {
    fn start(&self) -> Result<Option<String>, ChatBridgeError>;

    fn stop(&self) -> Result<(), ChatBridgeError>;

    fn close(&self) -> Result<(), ChatBridgeError>;

    fn send_message(
        &self,
        text: String,
        attachment: Option<NativeOutboundFile>,
    ) -> Result<(), ChatBridgeError>;

    fn send_client_params(
        &self,
        name: String,
        phone: String,
        fields: HashMap<String, String>,
    ) -> Result<(), ChatBridgeError>;

    fn fetch_new_messages(&self) -> Result<(), ChatBridgeError>;

    /// Start pushing message snapshots into `feed` until it reports closed
    fn watch_messages(&self, feed: Arc<MessageFeed>) -> Result<(), ChatBridgeError>;

    /// Start pushing connection-state changes into `feed` until it reports closed
    fn watch_connection_status(&self, feed: Arc<ConnectionFeed>) -> Result<(), ChatBridgeError>;
}

/// Builds native clients, implemented by the host
#[uniffi::export(with_foreign)]
pub trait NativeClientFactory: Send + Sync {
    fn create(&self, settings: ClientSettings)
        -> Result<Arc<dyn NativeChatClient>, ChatBridgeError>;
}

/// `ChatSdk` over a host-implemented client
pub(crate) struct ForeignSdk {
    client: Arc<dyn NativeChatClient>,
}

impl ForeignSdk {
    pub fn new(client: Arc<dyn NativeChatClient>) -> Self {
        Self { client }
    }

    async fn call<T, F>(&self, name: &'static str, f: F) -> SdkResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn NativeChatClient) -> Result<T, ChatBridgeError> + Send + 'static,
    {
        debug!("native client->{}()", name);
        let client = self.client.clone();
        match tokio::task::spawn_blocking(move || f(client.as_ref())).await {
            Ok(result) => result.map_err(SdkError::from),
            Err(e) => {
                error!("Native {} did not complete: {}", name, e);
                Err(SdkError::Unavailable(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl ChatSdk for ForeignSdk {
    async fn start(&self) -> SdkResult<Option<String>> {
        self.call("start", |c| c.start()).await
    }

    async fn stop(&self) -> SdkResult<()> {
        self.call("stop", |c| c.stop()).await
    }

    async fn close(&self) -> SdkResult<()> {
        self.call("close", |c| c.close()).await
    }

    async fn send_message(&self, text: String, attachment: Option<OutboundFile>) -> SdkResult<()> {
        let attachment = attachment.map(NativeOutboundFile::from);
        self.call("send_message", move |c| c.send_message(text, attachment))
            .await
    }

    async fn send_client_params(
        &self,
        name: String,
        phone: String,
        fields: HashMap<String, String>,
    ) -> SdkResult<()> {
        self.call("send_client_params", move |c| {
            c.send_client_params(name, phone, fields)
        })
        .await
    }

    async fn fetch_new_messages(&self) -> SdkResult<()> {
        self.call("fetch_new_messages", |c| c.fetch_new_messages())
            .await
    }

    fn messages(&self) -> MessageStream {
        let (tx, rx) = unbounded();
        let feed = Arc::new(MessageFeed { tx: tx.clone() });
        if let Err(e) = self.client.watch_messages(feed) {
            let _ = tx.unbounded_send(Err(SdkError::from(e)));
        }
        rx.boxed()
    }

    fn connection_status(&self) -> ConnectionStream {
        let (tx, rx) = unbounded();
        let feed = Arc::new(ConnectionFeed { tx: tx.clone() });
        if let Err(e) = self.client.watch_connection_status(feed) {
            let _ = tx.unbounded_send(Err(SdkError::from(e)));
        }
        rx.boxed()
    }
}

/// `ClientFactory` over a host-implemented factory
pub(crate) struct ForeignFactory {
    inner: Arc<dyn NativeClientFactory>,
}

impl ForeignFactory {
    pub fn new(inner: Arc<dyn NativeClientFactory>) -> Self {
        Self { inner }
    }
}

impl ClientFactory for ForeignFactory {
    fn create(&self, settings: &Settings) -> SdkResult<Arc<dyn ChatSdk>> {
        let client = self.inner.create(ClientSettings::from(settings))?;
        Ok(Arc::new(ForeignSdk::new(client)))
    }
}
