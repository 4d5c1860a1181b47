//! In-memory doubles for the chat SDK and the host event sink

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::mpsc::{unbounded, UnboundedSender};
use futures::StreamExt;
use parking_lot::Mutex;

use crate::config::Settings;
use crate::error::{SdkError, SdkResult};
use crate::events::{EventSink, HostEvent};
use crate::model::{ConnectionState, Message, OutboundFile};
use crate::sdk::{ChatSdk, ClientFactory, ConnectionStream, MessageStream};

/// One recorded SDK invocation
#[derive(Debug, Clone, PartialEq)]
pub enum SdkCall {
    Start,
    Stop,
    Close,
    SendMessage {
        text: String,
        attachment: Option<OutboundFile>,
    },
    SendClientParams {
        name: String,
        phone: String,
        fields: HashMap<String, String>,
    },
    FetchNewMessages,
}

impl SdkCall {
    fn op(&self) -> &'static str {
        match self {
            SdkCall::Start => "start",
            SdkCall::Stop => "stop",
            SdkCall::Close => "close",
            SdkCall::SendMessage { .. } => "send_message",
            SdkCall::SendClientParams { .. } => "send_client_params",
            SdkCall::FetchNewMessages => "fetch_new_messages",
        }
    }
}

#[derive(Default)]
pub struct MockSdk {
    message_txs: Mutex<Vec<UnboundedSender<SdkResult<Vec<Message>>>>>,
    state_txs: Mutex<Vec<UnboundedSender<SdkResult<ConnectionState>>>>,
    message_subscribes: Mutex<usize>,
    calls: Mutex<Vec<SdkCall>>,
    failures: Mutex<HashMap<&'static str, SdkError>>,
    start_status: Mutex<Option<String>>,
}

impl MockSdk {
    pub fn calls(&self) -> Vec<SdkCall> {
        self.calls.lock().clone()
    }

    /// Make every later call of `op` fail with `error`
    pub fn fail_on(&self, op: &'static str, error: SdkError) {
        self.failures.lock().insert(op, error);
    }

    pub fn set_start_status(&self, status: &str) {
        *self.start_status.lock() = Some(status.to_string());
    }

    pub fn push_messages(&self, messages: Vec<Message>) {
        self.message_txs
            .lock()
            .retain(|tx| tx.unbounded_send(Ok(messages.clone())).is_ok());
    }

    pub fn fail_messages(&self, error: SdkError) {
        self.message_txs
            .lock()
            .retain(|tx| tx.unbounded_send(Err(error.clone())).is_ok());
    }

    pub fn push_state(&self, state: ConnectionState) {
        self.state_txs
            .lock()
            .retain(|tx| tx.unbounded_send(Ok(state)).is_ok());
    }

    pub fn live_message_subscribers(&self) -> usize {
        self.message_txs.lock().iter().filter(|tx| !tx.is_closed()).count()
    }

    pub fn live_connection_subscribers(&self) -> usize {
        self.state_txs.lock().iter().filter(|tx| !tx.is_closed()).count()
    }

    pub fn message_subscribe_count(&self) -> usize {
        *self.message_subscribes.lock()
    }

    fn record(&self, call: SdkCall) -> SdkResult<()> {
        let op = call.op();
        self.calls.lock().push(call);
        match self.failures.lock().get(op) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ChatSdk for MockSdk {
    async fn start(&self) -> SdkResult<Option<String>> {
        self.record(SdkCall::Start)?;
        Ok(self.start_status.lock().clone())
    }

    async fn stop(&self) -> SdkResult<()> {
        self.record(SdkCall::Stop)
    }

    async fn close(&self) -> SdkResult<()> {
        self.record(SdkCall::Close)
    }

    async fn send_message(&self, text: String, attachment: Option<OutboundFile>) -> SdkResult<()> {
        self.record(SdkCall::SendMessage { text, attachment })
    }

    async fn send_client_params(
        &self,
        name: String,
        phone: String,
        fields: HashMap<String, String>,
    ) -> SdkResult<()> {
        self.record(SdkCall::SendClientParams { name, phone, fields })
    }

    async fn fetch_new_messages(&self) -> SdkResult<()> {
        self.record(SdkCall::FetchNewMessages)
    }

    fn messages(&self) -> MessageStream {
        let (tx, rx) = unbounded();
        self.message_txs.lock().push(tx);
        *self.message_subscribes.lock() += 1;
        rx.boxed()
    }

    fn connection_status(&self) -> ConnectionStream {
        let (tx, rx) = unbounded();
        self.state_txs.lock().push(tx);
        rx.boxed()
    }
}

/// Factory that hands out fresh `MockSdk`s and remembers them
#[derive(Default)]
pub struct MockFactory {
    created: Mutex<Vec<(Settings, Arc<MockSdk>)>>,
    failure: Mutex<Option<SdkError>>,
}

impl MockFactory {
    pub fn created_count(&self) -> usize {
        self.created.lock().len()
    }

    pub fn last(&self) -> Option<Arc<MockSdk>> {
        self.created.lock().last().map(|(_, sdk)| sdk.clone())
    }

    pub fn last_settings(&self) -> Option<Settings> {
        self.created.lock().last().map(|(settings, _)| settings.clone())
    }

    pub fn fail_with(&self, error: SdkError) {
        *self.failure.lock() = Some(error);
    }
}

impl ClientFactory for MockFactory {
    fn create(&self, settings: &Settings) -> SdkResult<Arc<dyn ChatSdk>> {
        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }
        let sdk = Arc::new(MockSdk::default());
        self.created.lock().push((settings.clone(), sdk.clone()));
        Ok(sdk)
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<HostEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: HostEvent) {
        self.events.lock().push(event);
    }
}

/// Poll `condition` until it holds, failing the test after about a second
pub async fn eventually<F: Fn() -> bool>(condition: F) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met in time");
}
