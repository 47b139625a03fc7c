//! 联邦同步服务订阅的内部事件
//!
//! 事件由进程内发布/订阅总线投递：至少一次，跨主题无序。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 头像更新事件主题
pub const USER_AVATAR_UPDATE_TOPIC: &str = "user.avatarUpdate";
/// 输入状态事件主题
pub const USER_TYPING_TOPIC: &str = "user.typing";

/// 输入状态事件中的用户
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypingUser {
    #[serde(default)]
    pub username: Option<String>,
}

/// 联邦同步关心的内部事件
///
/// 载荷字段都可能缺失，由事件接入层决定是否丢弃。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum FederationEvent {
    /// 用户头像已更新
    #[serde(rename = "user.avatarUpdate")]
    UserAvatarUpdated {
        #[serde(default)]
        username: Option<String>,
    },

    /// 用户开始或停止输入
    #[serde(rename = "user.typing", rename_all = "camelCase")]
    UserTyping {
        #[serde(default)]
        room_id: Option<String>,
        #[serde(default)]
        user: TypingUser,
        #[serde(default)]
        is_typing: bool,
    },
}

impl FederationEvent {
    /// 创建头像更新事件
    pub fn avatar_updated(username: impl Into<String>) -> Self {
        FederationEvent::UserAvatarUpdated {
            username: Some(username.into()),
        }
    }

    /// 创建输入状态事件
    pub fn typing(
        username: impl Into<String>,
        room_id: impl Into<String>,
        is_typing: bool,
    ) -> Self {
        FederationEvent::UserTyping {
            room_id: Some(room_id.into()),
            user: TypingUser {
                username: Some(username.into()),
            },
            is_typing,
        }
    }

    pub fn topic(&self) -> &'static str {
        match self {
            FederationEvent::UserAvatarUpdated { .. } => USER_AVATAR_UPDATE_TOPIC,
            FederationEvent::UserTyping { .. } => USER_TYPING_TOPIC,
        }
    }
}

/// 带投递元信息的事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub event: FederationEvent,
}

impl EventEnvelope {
    pub fn new(event: FederationEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            event,
        }
    }

    pub fn topic(&self) -> &'static str {
        self.event.topic()
    }
}
