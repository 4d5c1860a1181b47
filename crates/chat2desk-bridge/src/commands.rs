//! Outbound commands forwarded to the SDK
//!
//! Every command validates its input, requires an installed client, makes a
//! single SDK call and settles with a short marker. No retries, no queueing.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, error};

use crate::chat::ChatBridge;
use crate::config::required;
use crate::error::{Result, SdkError};
use crate::model::OutboundFile;
use crate::transcode::FileReference;

pub const SEND_OK: &str = "Success send";
pub const SEND_FILE_OK: &str = "Success send file";
pub const SEND_PARAMS_OK: &str = "Success send params";
pub const FETCH_OK: &str = "Success fetch";

/// Client profile as the host passes it to `sendUserInfo`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub name: Option<String>,
    pub phone: Option<String>,
    /// Extra client parameters forwarded untouched
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

fn log_failure(command: &str, error: SdkError) -> SdkError {
    error!("{} failed: {}", command, error);
    error
}

impl ChatBridge {
    pub async fn send_message(&self, text: String) -> Result<String> {
        debug!("Sending text message ({} chars)", text.chars().count());
        let client = self.client()?;
        client
            .send_message(text, None)
            .await
            .map_err(|e| log_failure("send_message", e))?;
        Ok(SEND_OK.to_string())
    }

    /// Send one file as a message with empty text
    pub async fn send_file(&self, file: FileReference) -> Result<String> {
        let outbound = OutboundFile::try_from(file)?;
        debug!(
            "Sending file {} ({}, {} bytes)",
            outbound.original_name, outbound.mime_type, outbound.file_size
        );
        let client = self.client()?;
        client
            .send_message(String::new(), Some(outbound))
            .await
            .map_err(|e| log_failure("send_file", e))?;
        Ok(SEND_FILE_OK.to_string())
    }

    pub async fn send_user_info(&self, info: UserInfo) -> Result<String> {
        let name = required("name", info.name)?;
        let phone = required("phone", info.phone)?;
        let client = self.client()?;
        client
            .send_client_params(name, phone, info.fields)
            .await
            .map_err(|e| log_failure("send_user_info", e))?;
        Ok(SEND_PARAMS_OK.to_string())
    }

    pub async fn fetch_new_messages(&self) -> Result<String> {
        let client = self.client()?;
        client
            .fetch_new_messages()
            .await
            .map_err(|e| log_failure("fetch_new_messages", e))?;
        Ok(FETCH_OK.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawSettings;
    use crate::error::BridgeError;
    use crate::model::LocalResource;
    use crate::test_support::{MockFactory, MockSdk, RecordingSink, SdkCall};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn ready() -> (Arc<MockSdk>, ChatBridge) {
        let factory = Arc::new(MockFactory::default());
        let bridge = ChatBridge::new(factory.clone(), Arc::new(RecordingSink::default()));
        bridge
            .init_chat(RawSettings {
                token: Some("t".into()),
                base_host: Some("b".into()),
                ws_host: Some("w".into()),
                storage_host: Some("s".into()),
                ..Default::default()
            })
            .unwrap();
        (factory.last().unwrap(), bridge)
    }

    fn file() -> FileReference {
        FileReference {
            uri: Some("/sdcard/Download/scan.jpg".into()),
            original_name: Some("scan.jpg".into()),
            mime_type: Some("image/jpeg".into()),
            file_size: Some(4096),
        }
    }

    #[tokio::test]
    async fn send_message_forwards_text() {
        let (sdk, bridge) = ready();
        assert_eq!(bridge.send_message("hi".into()).await.unwrap(), SEND_OK);
        assert_eq!(
            sdk.calls(),
            vec![SdkCall::SendMessage { text: "hi".into(), attachment: None }]
        );
    }

    #[tokio::test]
    async fn sdk_failure_rejects_with_error_marker() {
        let (sdk, bridge) = ready();
        sdk.fail_on("send_message", SdkError::call("not connected"));
        let err = bridge.send_message("hi".into()).await.unwrap_err();
        assert_eq!(err.code(), "ERROR");
        assert!(err.to_string().contains("not connected"));
        // single attempt
        assert_eq!(sdk.calls().len(), 1);
    }

    #[tokio::test]
    async fn send_file_uses_empty_text_and_outbound_file() {
        let (sdk, bridge) = ready();
        assert_eq!(bridge.send_file(file()).await.unwrap(), SEND_FILE_OK);
        assert_eq!(
            sdk.calls(),
            vec![SdkCall::SendMessage {
                text: String::new(),
                attachment: Some(OutboundFile {
                    resource: LocalResource::Path(PathBuf::from("/sdcard/Download/scan.jpg")),
                    original_name: "scan.jpg".into(),
                    mime_type: "image/jpeg".into(),
                    file_size: 4096,
                }),
            }]
        );
    }

    #[tokio::test]
    async fn send_file_without_mime_type_makes_no_call() {
        let (sdk, bridge) = ready();
        let mut incomplete = file();
        incomplete.mime_type = None;

        let err = bridge.send_file(incomplete).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_PARAMETER");
        assert!(sdk.calls().is_empty());
    }

    #[tokio::test]
    async fn send_user_info_requires_name_and_phone() {
        let (sdk, bridge) = ready();
        let err = bridge
            .send_user_info(UserInfo { name: Some("Ann".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidParameter { ref field, .. } if field == "phone"));
        assert!(sdk.calls().is_empty());

        let info = UserInfo {
            name: Some("Ann".into()),
            phone: Some("+70000000000".into()),
            fields: HashMap::from([("1".to_string(), "vip".to_string())]),
        };
        assert_eq!(bridge.send_user_info(info).await.unwrap(), SEND_PARAMS_OK);
        assert_eq!(
            sdk.calls(),
            vec![SdkCall::SendClientParams {
                name: "Ann".into(),
                phone: "+70000000000".into(),
                fields: HashMap::from([("1".to_string(), "vip".to_string())]),
            }]
        );
    }

    #[tokio::test]
    async fn send_user_info_rejects_blank_fields() {
        let (sdk, bridge) = ready();
        let err = bridge
            .send_user_info(UserInfo {
                name: Some("  ".into()),
                phone: Some("+70000000000".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidParameter { ref field, .. } if field == "name"));

        let err = bridge
            .send_user_info(UserInfo {
                name: Some("Ann".into()),
                phone: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_PARAMETER");
        assert!(sdk.calls().is_empty());
    }

    #[tokio::test]
    async fn user_info_parses_from_host_json() {
        let info: UserInfo = serde_json::from_str(r#"{"name":"Ann","phone":"1"}"#).unwrap();
        assert_eq!(info.name.as_deref(), Some("Ann"));
        assert!(info.fields.is_empty());
    }

    #[tokio::test]
    async fn fetch_new_messages_forwards() {
        let (sdk, bridge) = ready();
        assert_eq!(bridge.fetch_new_messages().await.unwrap(), FETCH_OK);
        assert_eq!(sdk.calls(), vec![SdkCall::FetchNewMessages]);
    }

    #[tokio::test]
    async fn commands_without_client_reject() {
        let bridge = ChatBridge::new(
            Arc::new(MockFactory::default()),
            Arc::new(RecordingSink::default()),
        );
        for result in [
            bridge.send_message("hi".into()).await,
            bridge.send_file(file()).await,
            bridge.fetch_new_messages().await,
        ] {
            assert!(matches!(result, Err(BridgeError::NotInitialized)));
        }
    }
}
