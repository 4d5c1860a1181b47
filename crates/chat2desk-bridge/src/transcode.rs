//! Conversions between SDK records and the flat records hosts consume
//!
//! Everything here is pure. Presence checks on host input are the only
//! validation performed.

use std::path::PathBuf;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::required;
use crate::error::{BridgeError, Result};
use crate::model::{Attachment, LocalResource, Message, OutboundFile};

/// Flat attachment record, serialised with the host's field names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRecord {
    pub id: i64,
    pub file_size: u64,
    pub content_type: String,
    pub link: String,
    pub original_file_name: String,
    pub status: String,
}

impl From<&Attachment> for AttachmentRecord {
    fn from(attachment: &Attachment) -> Self {
        Self {
            id: attachment.id,
            file_size: attachment.file_size,
            content_type: attachment.content_type.clone(),
            link: attachment.remote_link.clone(),
            original_file_name: attachment.original_file_name.clone(),
            status: attachment.upload_status.as_str().to_string(),
        }
    }
}

/// Flat message record, one element of the `onMessage` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: String,
    pub real_id: i64,
    pub read: String,
    pub status: String,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub direction: String,
    /// RFC 3339, UTC
    pub date: Option<String>,
    pub attachments: Vec<AttachmentRecord>,
}

impl From<&Message> for MessageRecord {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            real_id: message.real_id,
            read: message.read.as_str().to_string(),
            status: message.status.as_str().to_string(),
            text: message.text.clone(),
            direction: message.direction.as_str().to_string(),
            date: message
                .date
                .map(|d| d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            attachments: message
                .attachments
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(AttachmentRecord::from)
                .collect(),
        }
    }
}

/// Transcode one SDK batch, preserving order
pub fn message_records(messages: &[Message]) -> Vec<MessageRecord> {
    messages.iter().map(MessageRecord::from).collect()
}

/// File reference as the host passes it to `sendFile`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    pub uri: Option<String>,
    pub original_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
}

/// Resolve a host uri into the handle the SDK upload call reads from
pub fn resolve_resource(uri: &str) -> Result<LocalResource> {
    match Url::parse(uri) {
        Ok(url) if url.scheme() == "file" => url
            .to_file_path()
            .map(LocalResource::Path)
            .map_err(|_| BridgeError::invalid_parameter("uri", format!("not a local file uri: {}", uri))),
        Ok(url) => Ok(LocalResource::Uri(url)),
        // no scheme: a plain filesystem path
        Err(_) => Ok(LocalResource::Path(PathBuf::from(uri))),
    }
}

impl TryFrom<FileReference> for OutboundFile {
    type Error = BridgeError;

    fn try_from(file: FileReference) -> Result<Self> {
        let uri = required("uri", file.uri)?;
        let original_name = required("originalName", file.original_name)?;
        let mime_type = required("mimeType", file.mime_type)?;
        let file_size = file.file_size.ok_or_else(|| BridgeError::missing("fileSize"))?;
        let file_size = u64::try_from(file_size)
            .map_err(|_| BridgeError::invalid_parameter("fileSize", "must not be negative"))?;

        Ok(OutboundFile {
            resource: resolve_resource(&uri)?,
            original_name,
            mime_type,
            file_size,
        })
    }
}
