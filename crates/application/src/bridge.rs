use async_trait::async_trait;
use domain::{AvatarFile, AvatarMetadata, ContentUrl, ExternalId};
use thiserror::Error;

/// 联邦网络不可用（网络错误、协议错误、超时）
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    #[error("bridge unavailable: {0}")]
    Unavailable(String),
}

impl BridgeError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// 外部联邦网络的客户端抽象，所有出站联邦调用都经过这里
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FederationBridge: Send + Sync {
    /// 上传内容；远端拒绝或无法处理时返回 `Ok(None)`，这不是错误
    async fn upload_content(
        &self,
        file: &AvatarFile,
        metadata: &AvatarMetadata,
    ) -> Result<Option<ContentUrl>, BridgeError>;

    async fn set_remote_avatar(
        &self,
        external_user_id: &ExternalId,
        url: &ContentUrl,
    ) -> Result<(), BridgeError>;

    async fn notify_typing(
        &self,
        external_room_id: &ExternalId,
        external_user_id: &ExternalId,
        is_typing: bool,
    ) -> Result<(), BridgeError>;
}
