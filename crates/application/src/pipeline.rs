//! 带守卫的用例流水线
//!
//! 每一步要么带着值继续，要么以 [`StopReason`] 静默终止。终止不是错误：
//! 大多数本地事件涉及的用户与联邦无关，这是常态。

use std::fmt;

/// 流水线提前终止的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// 事件载荷缺少必要字段
    InvalidPayload,
    /// 输入状态同步被全局关闭
    TypingIndicatorDisabled,
    UserNotFound,
    RoomNotFound,
    /// 用户只是远端用户的本地占位
    RemoteUser,
    /// 用户没有可写回的内部 ID
    MissingInternalReference,
    AvatarBufferMissing,
    AvatarMetadataIncomplete,
    /// 联邦网络拒绝或无法处理上传
    UploadRejected,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::InvalidPayload => "invalid_payload",
            StopReason::TypingIndicatorDisabled => "typing_indicator_disabled",
            StopReason::UserNotFound => "user_not_found",
            StopReason::RoomNotFound => "room_not_found",
            StopReason::RemoteUser => "remote_user",
            StopReason::MissingInternalReference => "missing_internal_reference",
            StopReason::AvatarBufferMissing => "avatar_buffer_missing",
            StopReason::AvatarMetadataIncomplete => "avatar_metadata_incomplete",
            StopReason::UploadRejected => "upload_rejected",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个守卫步骤的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    Continue(T),
    Stop(StopReason),
}

impl<T> Step<T> {
    pub fn from_option(value: Option<T>, reason: StopReason) -> Self {
        match value {
            Some(value) => Step::Continue(value),
            None => Step::Stop(reason),
        }
    }

    /// 条件为假时终止
    pub fn guard(condition: bool, value: T, reason: StopReason) -> Self {
        if condition {
            Step::Continue(value)
        } else {
            Step::Stop(reason)
        }
    }
}

/// 一次用例调用的可观察结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// 所有步骤执行完毕，联邦调用已发出
    Delivered,
    /// 某个守卫终止了流水线，没有产生任何副作用
    Skipped(StopReason),
}

impl PipelineOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, PipelineOutcome::Delivered)
    }

    pub fn skip_reason(&self) -> Option<StopReason> {
        match self {
            PipelineOutcome::Delivered => None,
            PipelineOutcome::Skipped(reason) => Some(*reason),
        }
    }
}

/// 取出 `Step::Continue` 中的值，遇到 `Step::Stop` 时从当前函数返回
/// `Ok(PipelineOutcome::Skipped(..))`
macro_rules! proceed {
    ($step:expr) => {
        match $step {
            $crate::pipeline::Step::Continue(value) => value,
            $crate::pipeline::Step::Stop(reason) => {
                return Ok($crate::pipeline::PipelineOutcome::Skipped(reason));
            }
        }
    };
}

pub(crate) use proceed;
