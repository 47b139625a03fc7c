//! 领域模型错误定义

use thiserror::Error;

/// 领域模型错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 结构性校验失败（必填字段为空等）
    #[error("验证失败: {field}: {message}")]
    ValidationError { field: String, message: String },

    /// 前置条件不满足
    #[error("前置条件不满足: {message}")]
    PreconditionError { message: String },
}

impl DomainError {
    /// 创建验证错误
    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 创建前置条件错误
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionError {
            message: message.into(),
        }
    }
}

/// 领域模型结果类型
pub type DomainResult<T> = Result<T, DomainError>;
