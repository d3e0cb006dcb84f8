//! 用户信息值对象

use authgate_errors::{AppError, AppResult};

/// 身份附带的用户信息
///
/// `roles` 保持插入顺序且不去重，签发令牌时按此顺序拼接。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    user_id: String,
    name: String,
    roles: Vec<String>,
}

impl UserInfo {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        roles: Vec<String>,
    ) -> AppResult<Self> {
        let user_id = user_id.into();
        if user_id.is_empty() {
            return Err(AppError::business_rule("user ID cannot be empty"));
        }

        Ok(Self {
            user_id,
            name: name.into(),
            roles,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}
