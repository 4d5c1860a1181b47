//! Loopback session demo
//!
//! Runs the bridge against an in-process SDK that echoes every sent message
//! back on its message stream, and prints what the host would receive.
//!
//! Run with: RUST_LOG=debug cargo run --example loopback_session

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chat2desk_bridge::{
    ChatBridge, ChatSdk, ClientFactory, ConnectionState, ConnectionStream, DeliveryStatus,
    Direction, EventSink, HostEvent, Message, MessageStream, OutboundFile, RawSettings, ReadState,
    SdkResult, Settings,
};
use futures::channel::mpsc::{unbounded, UnboundedSender};
use futures::StreamExt;
use parking_lot::Mutex;

#[derive(Default)]
struct LoopbackSdk {
    history: Mutex<Vec<Message>>,
    message_txs: Mutex<Vec<UnboundedSender<SdkResult<Vec<Message>>>>>,
    state_txs: Mutex<Vec<UnboundedSender<SdkResult<ConnectionState>>>>,
}

impl LoopbackSdk {
    fn publish_state(&self, state: ConnectionState) {
        self.state_txs.lock().retain(|tx| tx.unbounded_send(Ok(state)).is_ok());
    }

    fn publish_history(&self) {
        let snapshot = self.history.lock().clone();
        self.message_txs
            .lock()
            .retain(|tx| tx.unbounded_send(Ok(snapshot.clone())).is_ok());
    }
}

#[async_trait]
impl ChatSdk for LoopbackSdk {
    async fn start(&self) -> SdkResult<Option<String>> {
        self.publish_state(ConnectionState::Connecting);
        self.publish_state(ConnectionState::Connected);
        Ok(None)
    }

    async fn stop(&self) -> SdkResult<()> {
        self.publish_state(ConnectionState::Closed);
        Ok(())
    }

    async fn close(&self) -> SdkResult<()> {
        Ok(())
    }

    async fn send_message(&self, text: String, attachment: Option<OutboundFile>) -> SdkResult<()> {
        {
            let mut history = self.history.lock();
            let id = history.len() + 1;
            history.push(Message {
                id: id.to_string(),
                real_id: id as i64,
                read: ReadState::Read,
                status: DeliveryStatus::Sent,
                text: Some(text),
                direction: Direction::Out,
                date: Some(chrono::Utc::now()),
                attachments: attachment.map(|_| Vec::new()),
            });
        }
        self.publish_history();
        Ok(())
    }

    async fn send_client_params(
        &self,
        _name: String,
        _phone: String,
        _fields: HashMap<String, String>,
    ) -> SdkResult<()> {
        Ok(())
    }

    async fn fetch_new_messages(&self) -> SdkResult<()> {
        self.publish_history();
        Ok(())
    }

    fn messages(&self) -> MessageStream {
        let (tx, rx) = unbounded();
        self.message_txs.lock().push(tx);
        rx.boxed()
    }

    fn connection_status(&self) -> ConnectionStream {
        let (tx, rx) = unbounded();
        self.state_txs.lock().push(tx);
        rx.boxed()
    }
}

struct LoopbackFactory;

impl ClientFactory for LoopbackFactory {
    fn create(&self, settings: &Settings) -> SdkResult<Arc<dyn ChatSdk>> {
        tracing::info!("Creating loopback client for {}", settings.base_host);
        Ok(Arc::new(LoopbackSdk::default()))
    }
}

struct PrintSink;

impl EventSink for PrintSink {
    fn emit(&self, event: HostEvent) {
        match event.payload_json() {
            Ok(payload) => println!("{} -> {}", event.name(), payload),
            Err(e) => eprintln!("cannot serialise {}: {}", event.name(), e),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let bridge = ChatBridge::new(Arc::new(LoopbackFactory), Arc::new(PrintSink));
    bridge.init_chat(RawSettings {
        token: Some("demo-token".into()),
        base_host: Some("https://api.example".into()),
        ws_host: Some("wss://ws.example".into()),
        storage_host: Some("https://storage.example".into()),
        ..Default::default()
    })?;

    println!("open: {}", bridge.open_chat().await?);
    println!("send: {}", bridge.send_message("Hello from the loopback demo".into()).await?);
    println!("fetch: {}", bridge.fetch_new_messages().await?);

    tokio::time::sleep(Duration::from_millis(100)).await;
    println!("close: {}", bridge.close_chat().await?);
    Ok(())
}
