//! Events re-emitted to the host

use serde::Serialize;

use crate::error::Result;
use crate::transcode::MessageRecord;

/// Event carrying message snapshots
pub const ON_MESSAGE: &str = "onMessage";

/// Event carrying connection-state changes
pub const CONNECTION_STATUS: &str = "connection_status";

/// Every event name a host may subscribe to
pub const SUPPORTED_EVENTS: [&str; 2] = [ON_MESSAGE, CONNECTION_STATUS];

/// Named event with a serialisable payload
///
/// Serialises to the payload object only; the name travels separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HostEvent {
    Messages { messages: Vec<MessageRecord> },
    ConnectionStatus { connection: String },
}

impl HostEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::Messages { .. } => ON_MESSAGE,
            HostEvent::ConnectionStatus { .. } => CONNECTION_STATUS,
        }
    }

    pub fn payload(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn payload_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Receiver of bridged events, implemented by the host layer
///
/// Called from the stream consumer tasks, one event at a time per stream, in
/// the order the SDK produced the updates.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: HostEvent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payloads_match_host_contract() {
        let event = HostEvent::ConnectionStatus {
            connection: "CONNECTED".into(),
        };
        assert_eq!(event.name(), "connection_status");
        assert_eq!(event.payload().unwrap(), json!({"connection": "CONNECTED"}));

        let event = HostEvent::Messages { messages: vec![] };
        assert_eq!(event.name(), "onMessage");
        assert_eq!(event.payload_json().unwrap(), r#"{"messages":[]}"#);
    }

    #[test]
    fn supported_events_cover_both_streams() {
        assert_eq!(SUPPORTED_EVENTS, ["onMessage", "connection_status"]);
    }
}
