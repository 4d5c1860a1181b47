//! Records owned by the chat SDK
//!
//! The bridge reads these and transcodes them for the host; it never mutates
//! them.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use url::Url;

/// Connection state as observed on the SDK's connection stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    #[default]
    Closed,
    Connecting,
    Connected,
    Reconnecting,
    Failed,
}

impl ConnectionState {
    /// Upper-case name the host receives in `connection_status` events
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Closed => "CLOSED",
            ConnectionState::Connecting => "CONNECTING",
            ConnectionState::Connected => "CONNECTED",
            ConnectionState::Reconnecting => "RECONNECTING",
            ConnectionState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    Unread,
    Read,
}

impl ReadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadState::Unread => "UNREAD",
            ReadState::Read => "READ",
        }
    }
}

/// Delivery status of a message or upload status of an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sending,
    Sent,
    Delivered,
    NotDelivered,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Sending => "SENDING",
            DeliveryStatus::Sent => "SENT",
            DeliveryStatus::Delivered => "DELIVERED",
            DeliveryStatus::NotDelivered => "NOT_DELIVERED",
        }
    }
}

/// IN: operator to client, OUT: client to operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "IN",
            Direction::Out => "OUT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub id: i64,
    pub file_size: u64,
    pub content_type: String,
    pub remote_link: String,
    pub original_file_name: String,
    pub upload_status: DeliveryStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Client-side identifier assigned by the SDK
    pub id: String,
    /// Server-side identifier, 0 until the server has acknowledged the message
    pub real_id: i64,
    pub read: ReadState,
    pub status: DeliveryStatus,
    pub text: Option<String>,
    pub direction: Direction,
    pub date: Option<DateTime<Utc>>,
    /// `None` when the SDK did not attach a list at all
    pub attachments: Option<Vec<Attachment>>,
}

impl Message {
    /// Plain incoming text message, the shape most SDK updates take
    pub fn incoming(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            real_id: 0,
            read: ReadState::Unread,
            status: DeliveryStatus::Delivered,
            text: Some(text.into()),
            direction: Direction::In,
            date: None,
            attachments: None,
        }
    }
}

/// Where the SDK upload call reads a file from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalResource {
    /// Filesystem path (plain path or `file://` URI)
    Path(PathBuf),
    /// Platform URI the native SDK resolves itself (`content://`, `ph://`, ...)
    Uri(Url),
}

impl LocalResource {
    /// Render back to the string form native SDKs accept
    pub fn to_uri_string(&self) -> String {
        match self {
            LocalResource::Path(path) => path.to_string_lossy().into_owned(),
            LocalResource::Uri(url) => url.to_string(),
        }
    }
}

/// File handed to the SDK send call; consumed once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundFile {
    pub resource: LocalResource,
    pub original_name: String,
    pub mime_type: String,
    pub file_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_names_match_host_contract() {
        assert_eq!(ConnectionState::Connected.to_string(), "CONNECTED");
        assert_eq!(ConnectionState::default(), ConnectionState::Closed);
        assert_eq!(DeliveryStatus::NotDelivered.as_str(), "NOT_DELIVERED");
        assert_eq!(Direction::Out.as_str(), "OUT");
        assert_eq!(ReadState::Unread.as_str(), "UNREAD");
    }

    #[test]
    fn resource_renders_back_to_uri() {
        let uri = Url::parse("content://media/external/images/42").unwrap();
        assert_eq!(
            LocalResource::Uri(uri).to_uri_string(),
            "content://media/external/images/42"
        );
        assert_eq!(
            LocalResource::Path(PathBuf::from("/tmp/a.png")).to_uri_string(),
            "/tmp/a.png"
        );
    }
}
