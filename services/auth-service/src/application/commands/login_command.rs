//! 登录命令

use std::fmt;

use authgate_cqrs_core::Command;

use crate::application::dto::UserInfoDto;
use crate::domain::auth::IdentifierType;

/// 登录命令
#[derive(Clone)]
pub struct LoginCommand {
    pub identifier_type: IdentifierType,
    pub identifier_value: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("identifier_type", &self.identifier_type)
            .field("identifier_value", &self.identifier_value)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Command for LoginCommand {
    const NAME: &'static str = "login";
    type Result = LoginResult;
}

/// 登录结果
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub access_token: String,
    pub refresh_token: String,
    pub user_info: UserInfoDto,
}
