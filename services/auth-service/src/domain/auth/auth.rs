//! Auth 聚合根

use authgate_errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use uuid::Uuid;

use super::{IdentifierType, UserInfo};

/// 默认最大错误尝试次数
pub const DEFAULT_MAX_WRONG_ATTEMPTS: i32 = 5;

/// 默认 access 令牌有效期（秒），7 天
pub const DEFAULT_MAX_TOKEN_AGE_SECONDS: i64 = 604_800;

/// 身份 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From)]
#[display("{_0}")]
pub struct AuthId(pub Uuid);

impl AuthId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AuthId {
    fn default() -> Self {
        Self::new()
    }
}

/// 构造 [`Auth`] 的属性
///
/// `id`、`max_wrong_attempts`、`max_token_age_seconds` 为 `None` 时在构造时填入默认值。
#[derive(Debug, Clone, Default)]
pub struct AuthProps {
    pub id: Option<AuthId>,
    pub identifier_type: IdentifierType,
    pub identifier_value: String,
    pub password_hash: String,
    pub user_info: Option<UserInfo>,
    pub encrypt_token: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub wrong_attempts: i32,
    pub max_wrong_attempts: Option<i32>,
    pub recovery_token: Option<String>,
    pub max_token_age_seconds: Option<i64>,
}

/// 身份聚合根
///
/// 构造后不可变，只能通过 getter 读取。
#[derive(Debug, Clone)]
pub struct Auth {
    id: AuthId,
    identifier_type: IdentifierType,
    identifier_value: String,
    password_hash: String,
    user_info: UserInfo,
    encrypt_token: bool,
    last_login_at: Option<DateTime<Utc>>,
    wrong_attempts: i32,
    max_wrong_attempts: i32,
    recovery_token: Option<String>,
    max_token_age_seconds: i64,
}

impl Auth {
    /// 创建新身份，校验不变量并填充默认值
    pub fn new(props: AuthProps) -> AppResult<Self> {
        if props.identifier_type == IdentifierType::Unspecified {
            return Err(AppError::business_rule(
                "identifier type cannot be unspecified",
            ));
        }
        if props.identifier_value.is_empty() {
            return Err(AppError::business_rule("identifier value cannot be empty"));
        }
        if props.password_hash.is_empty() {
            return Err(AppError::business_rule("password cannot be empty"));
        }
        let user_info = props
            .user_info
            .ok_or_else(|| AppError::business_rule("user info cannot be nil"))?;

        Ok(Self {
            id: props.id.unwrap_or_default(),
            identifier_type: props.identifier_type,
            identifier_value: props.identifier_value,
            password_hash: props.password_hash,
            user_info,
            encrypt_token: props.encrypt_token,
            last_login_at: props.last_login_at,
            wrong_attempts: props.wrong_attempts,
            max_wrong_attempts: props
                .max_wrong_attempts
                .unwrap_or(DEFAULT_MAX_WRONG_ATTEMPTS),
            recovery_token: props.recovery_token,
            max_token_age_seconds: props
                .max_token_age_seconds
                .unwrap_or(DEFAULT_MAX_TOKEN_AGE_SECONDS),
        })
    }

    /// 从持久化数据重建，执行与 [`Auth::new`] 相同的校验
    ///
    /// 已持久化的身份必须带有 ID。
    pub fn load(props: AuthProps) -> AppResult<Self> {
        if props.id.is_none() {
            return Err(AppError::business_rule("persisted auth must have an id"));
        }
        Self::new(props)
    }

    pub fn id(&self) -> AuthId {
        self.id
    }

    pub fn identifier_type(&self) -> IdentifierType {
        self.identifier_type
    }

    pub fn identifier_value(&self) -> &str {
        &self.identifier_value
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    pub fn user_id(&self) -> &str {
        self.user_info.user_id()
    }

    pub fn encrypt_token(&self) -> bool {
        self.encrypt_token
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    pub fn wrong_attempts(&self) -> i32 {
        self.wrong_attempts
    }

    pub fn max_wrong_attempts(&self) -> i32 {
        self.max_wrong_attempts
    }

    pub fn recovery_token(&self) -> Option<&str> {
        self.recovery_token.as_deref()
    }

    pub fn max_token_age_seconds(&self) -> i64 {
        self.max_token_age_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_props() -> AuthProps {
        AuthProps {
            identifier_type: IdentifierType::Email,
            identifier_value: "a@b.com".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            user_info: Some(UserInfo::new("u1", "Ana", vec!["admin".to_string()]).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_filled_on_creation() {
        let auth = Auth::new(valid_props()).unwrap();

        assert_eq!(auth.max_wrong_attempts(), 5);
        assert_eq!(auth.max_token_age_seconds(), 604_800);
        assert_eq!(auth.wrong_attempts(), 0);
        assert!(!auth.encrypt_token());
        assert!(auth.last_login_at().is_none());
        assert!(auth.recovery_token().is_none());
        assert_eq!(auth.user_id(), "u1");
    }

    #[test]
    fn test_each_creation_gets_its_own_id() {
        let a = Auth::new(valid_props()).unwrap();
        let b = Auth::new(valid_props()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_supplied_values_are_kept() {
        let id = AuthId::new();
        let auth = Auth::new(AuthProps {
            id: Some(id),
            max_wrong_attempts: Some(3),
            max_token_age_seconds: Some(60),
            encrypt_token: true,
            ..valid_props()
        })
        .unwrap();

        assert_eq!(auth.id(), id);
        assert_eq!(auth.max_wrong_attempts(), 3);
        assert_eq!(auth.max_token_age_seconds(), 60);
        assert!(auth.encrypt_token());
    }

    #[test]
    fn test_invariants() {
        let cases = [
            AuthProps {
                identifier_type: IdentifierType::Unspecified,
                ..valid_props()
            },
            AuthProps {
                identifier_value: String::new(),
                ..valid_props()
            },
            AuthProps {
                password_hash: String::new(),
                ..valid_props()
            },
            AuthProps {
                user_info: None,
                ..valid_props()
            },
        ];

        for props in cases {
            assert!(matches!(Auth::new(props), Err(AppError::BusinessRule(_))));
        }
    }

    #[test]
    fn test_load_requires_id_and_invariants() {
        assert!(Auth::load(valid_props()).is_err());

        let loaded = Auth::load(AuthProps {
            id: Some(AuthId::new()),
            ..valid_props()
        });
        assert!(loaded.is_ok());

        let corrupted = Auth::load(AuthProps {
            id: Some(AuthId::new()),
            password_hash: String::new(),
            ..valid_props()
        });
        assert!(corrupted.is_err());
    }
}
