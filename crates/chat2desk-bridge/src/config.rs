//! Client settings and their validation
//!
//! Hosts hand over settings as a loosely typed blob (`RawSettings`); the
//! bridge only builds an SDK client from a fully populated `Settings`.

use serde::Deserialize;

use crate::error::{BridgeError, Result};

/// SDK log verbosity forwarded to the client constructor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[serde(alias = "NONE")]
    None,
    #[serde(alias = "ERROR")]
    Error,
    #[default]
    #[serde(alias = "INFO")]
    Info,
    #[serde(alias = "DEBUG")]
    Debug,
    #[serde(alias = "ALL")]
    All,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::None => "off",
            LogLevel::Error => "error",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::All => "trace",
        }
    }
}

/// Settings exactly as the host supplied them; every field may be absent
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSettings {
    pub token: Option<String>,
    pub base_host: Option<String>,
    pub ws_host: Option<String>,
    pub storage_host: Option<String>,
    pub with_log: Option<bool>,
    pub log_level: Option<LogLevel>,
}

impl RawSettings {
    /// Parse the JSON object the scripting layer passes to `initChat`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| BridgeError::invalid_parameter("settings", format!("malformed settings: {}", e)))
    }
}

/// Validated settings used to construct one SDK client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub auth_token: String,
    pub base_host: String,
    pub ws_host: String,
    pub storage_host: String,
    pub with_log: bool,
    pub log_level: LogLevel,
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }
}

/// Value of a required text field; absent and blank both count as missing
pub(crate) fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BridgeError::missing(field)),
    }
}

impl TryFrom<RawSettings> for Settings {
    type Error = BridgeError;

    fn try_from(raw: RawSettings) -> Result<Self> {
        Ok(Settings {
            auth_token: required("token", raw.token)?,
            base_host: required("baseHost", raw.base_host)?,
            ws_host: required("wsHost", raw.ws_host)?,
            storage_host: required("storageHost", raw.storage_host)?,
            with_log: raw.with_log.unwrap_or(true),
            log_level: raw.log_level.unwrap_or_default(),
        })
    }
}

/// Fluent builder over `RawSettings`
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    raw: RawSettings,
}

impl SettingsBuilder {
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.raw.token = Some(token.into());
        self
    }

    pub fn base_host(mut self, host: impl Into<String>) -> Self {
        self.raw.base_host = Some(host.into());
        self
    }

    pub fn ws_host(mut self, host: impl Into<String>) -> Self {
        self.raw.ws_host = Some(host.into());
        self
    }

    pub fn storage_host(mut self, host: impl Into<String>) -> Self {
        self.raw.storage_host = Some(host.into());
        self
    }

    pub fn with_log(mut self, enabled: bool) -> Self {
        self.raw.with_log = Some(enabled);
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.raw.log_level = Some(level);
        self
    }

    pub fn build(self) -> Result<Settings> {
        Settings::try_from(self.raw)
    }
}
