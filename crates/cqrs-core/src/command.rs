//! Command trait 定义

use async_trait::async_trait;
use authgate_errors::AppResult;

/// Command trait
///
/// 会产生副作用（签发令牌、写入或删除身份）的操作。
pub trait Command: Send + Sync {
    /// 用于日志与指标的操作名
    const NAME: &'static str;

    type Result: Send;
}

/// Command Handler trait
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> AppResult<C::Result>;
}
