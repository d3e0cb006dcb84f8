//! 令牌校验查询

use authgate_cqrs_core::Query;

use crate::application::dto::UserInfoDto;

/// 校验 access 令牌并返回所属用户信息，不签发也不修改任何令牌
#[derive(Clone)]
pub struct VerifyTokenQuery {
    pub access_token: String,
}

impl Query for VerifyTokenQuery {
    const NAME: &'static str = "verify_token";
    type Result = UserInfoDto;
}
