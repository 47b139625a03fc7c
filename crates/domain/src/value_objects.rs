use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

fn non_empty(field: &str, value: impl Into<String>) -> Result<String, DomainError> {
    let value = value.into().trim().to_owned();
    if value.is_empty() {
        return Err(DomainError::validation_error(field, "cannot be empty"));
    }
    Ok(value)
}

/// 联邦命名空间中的稳定标识，例如 `@alice:example.org` 或 `!room:example.org`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalId(String);

impl ExternalId {
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        non_empty("external_id", value).map(Self)
    }

    /// 用本地 homeserver 域名限定一个本地名，得到 `@localpart:domain`。
    pub fn qualify(localpart: &str, domain: &str) -> Result<Self, DomainError> {
        let localpart = non_empty("localpart", localpart)?;
        let domain = non_empty("home_server_domain", domain)?;
        Ok(Self(format!(
            "@{}:{}",
            localpart.trim_start_matches('@'),
            domain
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ExternalId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ExternalId> for String {
    fn from(value: ExternalId) -> Self {
        value.0
    }
}

/// 本地存储中的记录标识。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InternalId(String);

impl InternalId {
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        non_empty("internal_id", value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for InternalId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<InternalId> for String {
    fn from(value: InternalId) -> Self {
        value.0
    }
}

/// 房间类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    DirectMessage,
    Channel,
    PrivateGroup,
    LiveChat,
}

impl RoomType {
    /// 本地存储使用的单字符类型码
    pub fn as_code(&self) -> &'static str {
        match self {
            RoomType::DirectMessage => "d",
            RoomType::Channel => "c",
            RoomType::PrivateGroup => "p",
            RoomType::LiveChat => "l",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "d" => Some(RoomType::DirectMessage),
            "c" => Some(RoomType::Channel),
            "p" => Some(RoomType::PrivateGroup),
            "l" => Some(RoomType::LiveChat),
            _ => None,
        }
    }
}

/// 头像文件内容，仅作为不透明的只读缓冲区传递。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvatarFile(Vec<u8>);

impl AvatarFile {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 文件存储中记录的头像元数据，字段可能缺失。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AvatarFileMetadata {
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl AvatarFileMetadata {
    pub fn new(content_type: Option<String>, file_name: Option<String>) -> Self {
        Self {
            content_type,
            file_name,
        }
    }
}

/// 上传所需的完整头像元数据。
///
/// 只能通过 [`AvatarMetadata::new`] 或 [`AvatarMetadata::from_stored`] 构造，
/// 两个字段都保证非空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarMetadata {
    content_type: String,
    file_name: String,
}

impl AvatarMetadata {
    pub fn new(
        content_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            content_type: non_empty("content_type", content_type)?,
            file_name: non_empty("file_name", file_name)?,
        })
    }

    /// 部分元数据视为不存在
    pub fn from_stored(stored: &AvatarFileMetadata) -> Option<Self> {
        let content_type = stored.content_type.as_deref()?;
        let file_name = stored.file_name.as_deref()?;
        Self::new(content_type, file_name).ok()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// 联邦网络返回的内容地址（如 `mxc://server/media-id`）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentUrl(String);

impl ContentUrl {
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        non_empty("content_url", value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContentUrl {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ContentUrl> for String {
    fn from(value: ContentUrl) -> Self {
        value.0
    }
}
