//! Auth Repository trait

use async_trait::async_trait;
use authgate_errors::AppResult;

use crate::domain::auth::{Auth, IdentifierType};

/// 身份仓储
///
/// 查询类方法以 `Ok(None)` 表示不存在，其它失败一律返回错误，
/// 调用方据此区分"不存在"与技术故障。
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// 保存身份及其用户信息；标识或用户 ID 冲突返回 `Conflict`
    async fn save(&self, auth: &Auth) -> AppResult<()>;

    /// 根据用户 ID 查找
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Auth>>;

    /// 根据登录标识查找
    async fn find_by_identifier(
        &self,
        identifier_type: IdentifierType,
        identifier_value: &str,
    ) -> AppResult<Option<Auth>>;

    /// 根据用户 ID 删除；不存在时返回 `NotFound`
    async fn delete(&self, user_id: &str) -> AppResult<()>;
}
