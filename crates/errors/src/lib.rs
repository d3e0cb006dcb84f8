//! authgate-errors - 统一错误处理
//!
//! 错误按来源分为四类：参数校验、业务规则、资源不存在、基础设施。
//! 只有基础设施类错误允许调用方重试。

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Business rule violated: {0}")]
    BusinessRule(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 缺少或为空的必填字段
    Validation,
    /// 不变量、重复身份、凭证或令牌无效
    BusinessRule,
    /// 身份不存在
    NotFound,
    /// 持久化或密码学原语失败
    Infrastructure,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn crypto(msg: impl Into<String>) -> Self {
        Self::Crypto(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 错误所属分类
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::BusinessRule(_) | Self::Conflict(_) | Self::Unauthenticated(_) => {
                ErrorKind::BusinessRule
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Database(_) | Self::Crypto(_) | Self::Internal(_) => ErrorKind::Infrastructure,
        }
    }

    /// 是否允许调用方重试
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Infrastructure
    }

    /// 转换为 gRPC 状态码
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            Self::NotFound(_) => tonic::Code::NotFound,
            Self::Validation(_) => tonic::Code::InvalidArgument,
            Self::BusinessRule(_) => tonic::Code::FailedPrecondition,
            Self::Conflict(_) => tonic::Code::AlreadyExists,
            Self::Unauthenticated(_) => tonic::Code::Unauthenticated,
            Self::Database(_) => tonic::Code::Unavailable,
            Self::Crypto(_) => tonic::Code::Internal,
            Self::Internal(_) => tonic::Code::Internal,
        }
    }
}

impl From<AppError> for tonic::Status {
    fn from(err: AppError) -> Self {
        tonic::Status::new(err.grpc_code(), err.to_string())
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
