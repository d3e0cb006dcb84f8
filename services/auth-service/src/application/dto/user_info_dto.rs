//! 用户信息 DTO

use crate::domain::auth::UserInfo;

/// 用户信息的对外投影
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfoDto {
    pub user_id: String,
    pub name: String,
    pub roles: Vec<String>,
}

impl From<&UserInfo> for UserInfoDto {
    fn from(info: &UserInfo) -> Self {
        Self {
            user_id: info.user_id().to_string(),
            name: info.name().to_string(),
            roles: info.roles().to_vec(),
        }
    }
}
