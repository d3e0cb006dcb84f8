//! 注册命令

use std::fmt;

use authgate_cqrs_core::Command;

use crate::application::dto::UserInfoDto;
use crate::domain::auth::IdentifierType;

/// 注册命令
///
/// `max_token_age_seconds` / `max_wrong_attempts` 为 `None` 时使用默认值，
/// 显式给出时必须大于 0。
#[derive(Clone)]
pub struct RegisterCommand {
    pub identifier_type: IdentifierType,
    pub identifier_value: String,
    pub password: String,
    pub user_info: UserInfoDto,
    pub encrypt_token: bool,
    pub max_token_age_seconds: Option<i64>,
    pub max_wrong_attempts: Option<i32>,
}

impl fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("identifier_type", &self.identifier_type)
            .field("identifier_value", &self.identifier_value)
            .field("password", &"[REDACTED]")
            .field("user_info", &self.user_info)
            .field("encrypt_token", &self.encrypt_token)
            .field("max_token_age_seconds", &self.max_token_age_seconds)
            .field("max_wrong_attempts", &self.max_wrong_attempts)
            .finish()
    }
}

impl Command for RegisterCommand {
    const NAME: &'static str = "register";
    type Result = RegisterResult;
}

/// 注册结果，不包含密码哈希
#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub identifier_type: IdentifierType,
    pub identifier_value: String,
    pub user_info: UserInfoDto,
}
