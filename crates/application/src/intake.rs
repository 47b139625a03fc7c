//! 事件接入
//!
//! 校验总线事件载荷并分派到 [`UserFederationSender`]。载荷不完整的事件直接忽略，
//! 不调用服务；服务的结果和错误原样返回，重试策略由调用方决定。

use std::sync::Arc;

use async_trait::async_trait;
use domain::FederationEvent;
use tracing::debug;

use crate::error::ApplicationError;
use crate::pipeline::{PipelineOutcome, StopReason};
use crate::services::UserFederationSender;

/// 总线事件处理器
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FederationEventHandler: Send + Sync {
    async fn handle_event(
        &self,
        event: &FederationEvent,
    ) -> Result<PipelineOutcome, ApplicationError>;
}

pub struct UserFederationEventHandler {
    sender: Arc<UserFederationSender>,
}

impl UserFederationEventHandler {
    pub fn new(sender: Arc<UserFederationSender>) -> Self {
        Self { sender }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl FederationEventHandler for UserFederationEventHandler {
    async fn handle_event(
        &self,
        event: &FederationEvent,
    ) -> Result<PipelineOutcome, ApplicationError> {
        match event {
            FederationEvent::UserAvatarUpdated { username } => {
                let Some(username) = present(username) else {
                    debug!(topic = event.topic(), "ignoring event without username");
                    return Ok(PipelineOutcome::Skipped(StopReason::InvalidPayload));
                };
                self.sender.after_avatar_changed(username).await
            }
            FederationEvent::UserTyping {
                room_id,
                user,
                is_typing,
            } => {
                let (Some(room_id), Some(username)) = (present(room_id), present(&user.username))
                else {
                    debug!(topic = event.topic(), "ignoring event without room or username");
                    return Ok(PipelineOutcome::Skipped(StopReason::InvalidPayload));
                };
                self.sender.on_typing(username, room_id, *is_typing).await
            }
        }
    }
}
