//! Query trait 定义

use async_trait::async_trait;
use authgate_errors::AppResult;

/// Query trait
pub trait Query: Send + Sync {
    /// 用于日志与指标的操作名
    const NAME: &'static str;

    type Result: Send;
}

/// Query Handler trait
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn handle(&self, query: Q) -> AppResult<Q::Result>;
}
