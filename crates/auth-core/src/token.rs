//! JWT 令牌服务
//!
//! access 与 refresh 令牌使用不同的密钥签名，一种密钥签出的令牌
//! 不可能通过另一种密钥的校验。

use authgate_errors::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// access 令牌的 `type` 声明值
pub const ACCESS_TOKEN_TYPE: &str = "access";

/// refresh 令牌的 `type` 声明值
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// refresh 令牌有效期（秒），固定 7 天，与身份自身的 access 令牌时长无关
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// access 令牌有效期上限（秒），10 年
pub const MAX_ACCESS_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// JWT Claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// 逗号拼接的角色列表，仅 access 令牌携带
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<String>,
    /// Token type (access or refresh)
    #[serde(rename = "type", default)]
    pub token_type: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// 有效期超出时间表示范围时返回错误
    fn new(
        user_id: &str,
        roles: Option<String>,
        token_type: &str,
        expires_in_secs: i64,
    ) -> AppResult<Self> {
        let now = Utc::now();
        let exp = Duration::try_seconds(expires_in_secs)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Token lifetime out of range: {} seconds",
                    expires_in_secs
                ))
            })?;

        Ok(Self {
            sub: user_id.to_string(),
            roles,
            token_type: token_type.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    pub fn is_access_token(&self) -> bool {
        self.token_type == ACCESS_TOKEN_TYPE
    }

    pub fn is_refresh_token(&self) -> bool {
        self.token_type == REFRESH_TOKEN_TYPE
    }

    /// 拆分 `roles` 声明
    pub fn role_list(&self) -> Vec<String> {
        self.roles
            .as_deref()
            .map(|roles| {
                roles
                    .split(',')
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Token 服务
#[derive(Clone)]
pub struct TokenService {
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
}

impl TokenService {
    /// 两份密钥都不能为空，且必须互不相同
    pub fn new(access_secret: &str, refresh_secret: &str) -> AppResult<Self> {
        if access_secret.is_empty() || refresh_secret.is_empty() {
            return Err(AppError::internal("JWT secrets must not be empty"));
        }
        if access_secret == refresh_secret {
            return Err(AppError::internal(
                "Access and refresh token secrets must differ",
            ));
        }

        Ok(Self {
            access_encoding_key: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding_key: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding_key: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding_key: DecodingKey::from_secret(refresh_secret.as_bytes()),
        })
    }

    /// 生成访问令牌，有效期由调用方（身份自身的配置）决定
    pub fn generate_access_token(
        &self,
        user_id: &str,
        roles: &[String],
        expires_in_secs: i64,
    ) -> AppResult<String> {
        let claims = Claims::new(
            user_id,
            Some(roles.join(",")),
            ACCESS_TOKEN_TYPE,
            expires_in_secs,
        )?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.access_encoding_key)
            .map_err(|e| AppError::crypto(format!("Failed to generate access token: {}", e)))
    }

    /// 生成刷新令牌
    pub fn generate_refresh_token(&self, user_id: &str) -> AppResult<String> {
        let claims = Claims::new(user_id, None, REFRESH_TOKEN_TYPE, REFRESH_TOKEN_TTL_SECS)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_encoding_key)
            .map_err(|e| AppError::crypto(format!("Failed to generate refresh token: {}", e)))
    }

    /// 校验访问令牌并取出 Claims
    pub fn extract_claims(&self, token: &str) -> AppResult<Claims> {
        let claims = decode_claims(token, &self.access_decoding_key)?;

        if !claims.is_access_token() {
            return Err(AppError::unauthenticated("Not an access token"));
        }

        Ok(claims)
    }

    /// 校验刷新令牌并取出 Claims
    pub fn extract_refresh_claims(&self, token: &str) -> AppResult<Claims> {
        let claims = decode_claims(token, &self.refresh_decoding_key)?;

        if !claims.is_refresh_token() {
            return Err(AppError::unauthenticated("Invalid token type"));
        }

        Ok(claims)
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // 接受整个 HMAC 家族，拒绝其它签名算法
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.validate_exp = true;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.leeway = 0; // 不允许时间偏差
    validation.set_required_spec_claims(&["exp", "iat", "sub"]);
    validation
}

fn decode_claims(token: &str, key: &DecodingKey) -> AppResult<Claims> {
    decode::<Claims>(token, key, &validation())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::unauthenticated("Token expired"),
            ErrorKind::InvalidAlgorithm => {
                AppError::unauthenticated("Unexpected signing algorithm")
            }
            _ => AppError::unauthenticated(format!("Invalid token: {}", e)),
        })
}
