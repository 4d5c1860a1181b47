//! Host-supplied records: settings, file references, client profile

use std::collections::HashMap;

use chat2desk_bridge::config;
use chat2desk_bridge::{transcode, RawSettings, Settings};

/// SDK log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum LogLevel {
    None,
    Error,
    Info,
    Debug,
    All,
}

impl From<LogLevel> for config::LogLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::None => config::LogLevel::None,
            LogLevel::Error => config::LogLevel::Error,
            LogLevel::Info => config::LogLevel::Info,
            LogLevel::Debug => config::LogLevel::Debug,
            LogLevel::All => config::LogLevel::All,
        }
    }
}

impl From<config::LogLevel> for LogLevel {
    fn from(level: config::LogLevel) -> Self {
        match level {
            config::LogLevel::None => LogLevel::None,
            config::LogLevel::Error => LogLevel::Error,
            config::LogLevel::Info => LogLevel::Info,
            config::LogLevel::Debug => LogLevel::Debug,
            config::LogLevel::All => LogLevel::All,
        }
    }
}

/// Settings passed to `init_chat`
///
/// Every field is optional on the wire; the four hosts/token are checked
/// before any client is built.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct ChatSettings {
    pub token: Option<String>,
    pub base_host: Option<String>,
    pub ws_host: Option<String>,
    pub storage_host: Option<String>,
    pub with_log: Option<bool>,
    pub log_level: Option<LogLevel>,
}

impl From<ChatSettings> for RawSettings {
    fn from(s: ChatSettings) -> Self {
        RawSettings {
            token: s.token,
            base_host: s.base_host,
            ws_host: s.ws_host,
            storage_host: s.storage_host,
            with_log: s.with_log,
            log_level: s.log_level.map(Into::into),
        }
    }
}

/// Validated settings handed to `NativeClientFactory::create`
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ClientSettings {
    pub auth_token: String,
    pub base_host: String,
    pub ws_host: String,
    pub storage_host: String,
    pub with_log: bool,
    pub log_level: LogLevel,
}

impl From<&Settings> for ClientSettings {
    fn from(s: &Settings) -> Self {
        ClientSettings {
            auth_token: s.auth_token.clone(),
            base_host: s.base_host.clone(),
            ws_host: s.ws_host.clone(),
            storage_host: s.storage_host.clone(),
            with_log: s.with_log,
            log_level: s.log_level.into(),
        }
    }
}

/// File picked on the host side, passed to `send_file`
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FileReference {
    pub uri: Option<String>,
    pub original_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<i64>,
}

impl From<FileReference> for transcode::FileReference {
    fn from(f: FileReference) -> Self {
        transcode::FileReference {
            uri: f.uri,
            original_name: f.original_name,
            mime_type: f.mime_type,
            file_size: f.file_size,
        }
    }
}

/// Client profile passed to `send_user_info`
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct UserInfo {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub fields: HashMap<String, String>,
}

impl From<UserInfo> for chat2desk_bridge::UserInfo {
    fn from(u: UserInfo) -> Self {
        chat2desk_bridge::UserInfo {
            name: u.name,
            phone: u.phone,
            fields: u.fields,
        }
    }
}
