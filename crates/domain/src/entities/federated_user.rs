//! 联邦用户实体

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{ExternalId, InternalId};

/// 仅来自联邦侧的用户资料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub display_name: String,
}

impl UserProfile {
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
        }
    }
}

/// 已知的本地账户记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalUserRecord {
    pub id: InternalId,
    pub username: String,
    pub display_name: String,
}

impl LocalUserRecord {
    pub fn new(
        id: InternalId,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
        }
    }
}

/// 联邦用户
///
/// `exists_only_on_proxy_server` 为 `true` 表示这是远端用户在本地的占位记录，
/// 没有真正的本地账户。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedUser {
    external_id: ExternalId,
    internal_id: Option<InternalId>,
    username: String,
    display_name: String,
    exists_only_on_proxy_server: bool,
    federated: bool,
}

impl FederatedUser {
    /// 仅根据联邦侧信息构造
    pub fn proxy(
        external_id: ExternalId,
        profile: UserProfile,
        exists_only_on_proxy_server: bool,
    ) -> DomainResult<Self> {
        let (username, display_name) =
            Self::validate_profile(profile.username, profile.display_name)?;
        Ok(Self {
            external_id,
            internal_id: None,
            username,
            display_name,
            exists_only_on_proxy_server,
            federated: false,
        })
    }

    /// 对应的本地账户已知时构造，携带内部 ID
    pub fn with_internal_reference(
        external_id: ExternalId,
        exists_only_on_proxy_server: bool,
        record: LocalUserRecord,
    ) -> DomainResult<Self> {
        let (username, display_name) =
            Self::validate_profile(record.username, record.display_name)?;
        Ok(Self {
            external_id,
            internal_id: Some(record.id),
            username,
            display_name,
            exists_only_on_proxy_server,
            federated: false,
        })
    }

    pub fn external_id(&self) -> &ExternalId {
        &self.external_id
    }

    /// 未携带本地引用时返回 `None`
    pub fn internal_id(&self) -> Option<&InternalId> {
        self.internal_id.as_ref()
    }

    pub fn require_internal_id(&self) -> DomainResult<&InternalId> {
        self.internal_id.as_ref().ok_or_else(|| {
            DomainError::precondition(format!(
                "federated user {} has no internal reference",
                self.external_id
            ))
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn exists_only_on_proxy_server(&self) -> bool {
        self.exists_only_on_proxy_server
    }

    pub fn is_federated(&self) -> bool {
        self.federated
    }

    pub fn mark_federated(&mut self) {
        self.federated = true;
    }

    /// 头像写回目标
    ///
    /// 只有拥有真实本地账户（非代理占位）且携带内部 ID 的用户才有写回目标。
    pub fn avatar_write_back_target(&self) -> Option<&InternalId> {
        if self.exists_only_on_proxy_server {
            return None;
        }
        self.internal_id.as_ref()
    }

    fn validate_profile(username: String, display_name: String) -> DomainResult<(String, String)> {
        let username = username.trim().to_owned();
        if username.is_empty() {
            return Err(DomainError::validation_error("username", "cannot be empty"));
        }
        let display_name = match display_name.trim() {
            "" => username.clone(),
            name => name.to_owned(),
        };
        Ok((username, display_name))
    }
}
