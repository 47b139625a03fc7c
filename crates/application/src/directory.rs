use async_trait::async_trait;
use domain::{ContentUrl, FederatedRoom, FederatedUser, InternalId};
use thiserror::Error;

/// 目录访问失败（存储不可达、超时等）
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

impl DirectoryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// 本地用户目录
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_internal_username(
        &self,
        username: &str,
    ) -> Result<Option<FederatedUser>, DirectoryError>;

    async fn find_by_internal_id(&self, id: &str) -> Result<Option<FederatedUser>, DirectoryError>;

    /// 写回联邦网络上的头像地址，重复写入同一地址只是覆盖
    async fn record_avatar_url(
        &self,
        internal_id: &InternalId,
        url: &ContentUrl,
    ) -> Result<(), DirectoryError>;
}

/// 本地房间目录
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    async fn find_by_internal_id(&self, id: &str) -> Result<Option<FederatedRoom>, DirectoryError>;
}
