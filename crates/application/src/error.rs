use domain::DomainError;
use thiserror::Error;

use crate::bridge::BridgeError;
use crate::directory::DirectoryError;
use crate::file_store::FileStoreError;

/// 用例失败只会是基础设施错误，原样向事件接入层传播
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    FileStore(#[from] FileStoreError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}

impl ApplicationError {
    /// 重新投递整个事件是否可能成功
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ApplicationError::Domain(_))
    }
}
