use std::sync::Arc;

use domain::{AvatarFile, AvatarMetadata, ContentUrl, FederatedRoom, FederatedUser, InternalId};
use tracing::{debug, info};

use crate::{
    bridge::FederationBridge,
    directory::{RoomDirectory, UserDirectory},
    error::ApplicationError,
    file_store::AvatarFileStore,
    pipeline::{proceed, PipelineOutcome, Step, StopReason},
    settings::FederationSettings,
};

pub struct UserFederationSenderDependencies {
    pub user_directory: Arc<dyn UserDirectory>,
    pub room_directory: Arc<dyn RoomDirectory>,
    pub avatar_file_store: Arc<dyn AvatarFileStore>,
    pub settings: Arc<dyn FederationSettings>,
    pub bridge: Arc<dyn FederationBridge>,
}

/// 把本地用户的头像与输入状态同步到联邦网络
///
/// 不持有任何可变状态，每次调用都重新解析实体；同一用户的并发调用之间
/// 不保证顺序，需要时由事件接入层按用户串行投递。
pub struct UserFederationSender {
    deps: UserFederationSenderDependencies,
}

impl UserFederationSender {
    pub fn new(deps: UserFederationSenderDependencies) -> Self {
        Self { deps }
    }

    /// 用户头像变更后，把新头像上传到联邦网络并写回本地
    pub async fn after_avatar_changed(
        &self,
        username: &str,
    ) -> Result<PipelineOutcome, ApplicationError> {
        let outcome = self.propagate_avatar(username).await?;
        match outcome {
            PipelineOutcome::Delivered => info!(username = %username, "avatar propagated"),
            PipelineOutcome::Skipped(reason) => {
                debug!(username = %username, reason = %reason, "avatar propagation skipped")
            }
        }
        Ok(outcome)
    }

    /// 用户在房间内开始或停止输入
    pub async fn on_typing(
        &self,
        username: &str,
        room_id: &str,
        is_typing: bool,
    ) -> Result<PipelineOutcome, ApplicationError> {
        let outcome = self.propagate_typing(username, room_id, is_typing).await?;
        match outcome {
            PipelineOutcome::Delivered => debug!(
                username = %username,
                room_id = %room_id,
                is_typing,
                "typing state propagated"
            ),
            PipelineOutcome::Skipped(reason) => debug!(
                username = %username,
                room_id = %room_id,
                reason = %reason,
                "typing propagation skipped"
            ),
        }
        Ok(outcome)
    }

    async fn propagate_avatar(&self, username: &str) -> Result<PipelineOutcome, ApplicationError> {
        let user = proceed!(self.resolve_user(username).await?);
        let internal_id = proceed!(Self::write_back_target(&user));
        let file = proceed!(self.load_avatar_buffer(internal_id).await?);
        let metadata = proceed!(self.load_avatar_metadata(internal_id).await?);
        let url = proceed!(self.upload_avatar(&file, &metadata).await?);

        // 先写回本地，成功后才通知联邦网络
        self.deps
            .user_directory
            .record_avatar_url(internal_id, &url)
            .await?;
        self.deps
            .bridge
            .set_remote_avatar(user.external_id(), &url)
            .await?;

        Ok(PipelineOutcome::Delivered)
    }

    async fn propagate_typing(
        &self,
        username: &str,
        room_id: &str,
        is_typing: bool,
    ) -> Result<PipelineOutcome, ApplicationError> {
        // 开关最先检查，关闭时不做任何查询
        proceed!(self.typing_enabled());
        let user = proceed!(self.resolve_user(username).await?);
        let room = proceed!(self.resolve_room(room_id).await?);

        self.deps
            .bridge
            .notify_typing(room.external_id(), user.external_id(), is_typing)
            .await?;

        Ok(PipelineOutcome::Delivered)
    }

    fn typing_enabled(&self) -> Step<()> {
        Step::guard(
            self.deps.settings.is_typing_indicator_enabled(),
            (),
            StopReason::TypingIndicatorDisabled,
        )
    }

    async fn resolve_user(&self, username: &str) -> Result<Step<FederatedUser>, ApplicationError> {
        let user = self
            .deps
            .user_directory
            .find_by_internal_username(username)
            .await?;
        Ok(Step::from_option(user, StopReason::UserNotFound))
    }

    async fn resolve_room(&self, room_id: &str) -> Result<Step<FederatedRoom>, ApplicationError> {
        let room = self.deps.room_directory.find_by_internal_id(room_id).await?;
        Ok(Step::from_option(room, StopReason::RoomNotFound))
    }

    fn write_back_target(user: &FederatedUser) -> Step<&InternalId> {
        match user.avatar_write_back_target() {
            Some(internal_id) => Step::Continue(internal_id),
            None if user.exists_only_on_proxy_server() => Step::Stop(StopReason::RemoteUser),
            None => Step::Stop(StopReason::MissingInternalReference),
        }
    }

    async fn load_avatar_buffer(
        &self,
        internal_id: &InternalId,
    ) -> Result<Step<AvatarFile>, ApplicationError> {
        let file = self.deps.avatar_file_store.get_buffer(internal_id).await?;
        Ok(Step::from_option(file, StopReason::AvatarBufferMissing))
    }

    async fn load_avatar_metadata(
        &self,
        internal_id: &InternalId,
    ) -> Result<Step<AvatarMetadata>, ApplicationError> {
        let stored = self.deps.avatar_file_store.get_metadata(internal_id).await?;
        let metadata = stored.as_ref().and_then(AvatarMetadata::from_stored);
        Ok(Step::from_option(
            metadata,
            StopReason::AvatarMetadataIncomplete,
        ))
    }

    async fn upload_avatar(
        &self,
        file: &AvatarFile,
        metadata: &AvatarMetadata,
    ) -> Result<Step<ContentUrl>, ApplicationError> {
        let url = self.deps.bridge.upload_content(file, metadata).await?;
        Ok(Step::from_option(url, StopReason::UploadRejected))
    }
}
