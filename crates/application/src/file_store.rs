use async_trait::async_trait;
use domain::{AvatarFile, AvatarFileMetadata, InternalId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FileStoreError {
    #[error("file store unavailable: {0}")]
    Unavailable(String),
}

impl FileStoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// 头像文件存储
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AvatarFileStore: Send + Sync {
    async fn get_buffer(&self, user_id: &InternalId) -> Result<Option<AvatarFile>, FileStoreError>;

    /// 返回存储中记录的元数据，字段可能不完整
    async fn get_metadata(
        &self,
        user_id: &InternalId,
    ) -> Result<Option<AvatarFileMetadata>, FileStoreError>;
}
