//! 刷新令牌命令

use authgate_cqrs_core::Command;

use crate::application::dto::UserInfoDto;

/// 用 refresh 令牌换取新的 access 令牌，refresh 令牌本身不轮换
#[derive(Clone)]
pub struct RefreshTokenCommand {
    pub refresh_token: String,
}

impl Command for RefreshTokenCommand {
    const NAME: &'static str = "refresh_token";
    type Result = RefreshTokenResult;
}

#[derive(Debug, Clone)]
pub struct RefreshTokenResult {
    pub access_token: String,
    pub user_info: UserInfoDto,
}
