//! 令牌的信封加密与解封
//!
//! 签发时按身份的 `encrypt_token` 决定是否加密；校验时先尝试解封，
//! 失败则按明文处理（refresh / verify 接口事先不知道令牌属于哪个身份）。

use std::sync::Arc;

use authgate_auth_core::EnvelopeService;
use authgate_errors::{AppError, AppResult};
use tracing::warn;

use crate::domain::auth::Auth;
use crate::error::AuthError;

/// 解封后的令牌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedToken {
    pub token: String,
    /// 是否经过信封解密
    pub was_sealed: bool,
}

/// 令牌加解密
#[derive(Clone)]
pub struct TokenCipher {
    envelope: Arc<EnvelopeService>,
    strict: bool,
}

impl TokenCipher {
    /// `strict` 为 true 时，开启加密的身份不接受明文令牌
    pub fn new(envelope: Arc<EnvelopeService>, strict: bool) -> Self {
        Self { envelope, strict }
    }

    /// 按需加密签发的令牌
    pub fn seal(&self, token: String, encrypt: bool) -> AppResult<String> {
        if !encrypt {
            return Ok(token);
        }

        self.envelope.encrypt(&token).map_err(|e| {
            warn!(error = %e, "Token encryption failed");
            AuthError::TokenEncryptionFailed.into()
        })
    }

    /// 尝试解封；任何失败或解出空串都退回原始输入
    pub fn open(&self, token: &str) -> OpenedToken {
        match self.envelope.decrypt(token) {
            Ok(plain) if !plain.is_empty() => OpenedToken {
                token: plain,
                was_sealed: true,
            },
            _ => OpenedToken {
                token: token.to_string(),
                was_sealed: false,
            },
        }
    }

    /// 严格模式下校验令牌形态与身份设置一致
    pub fn ensure_form(&self, opened: &OpenedToken, auth: &Auth) -> AppResult<()> {
        if self.strict && auth.encrypt_token() && !opened.was_sealed {
            warn!(
                user_id = %auth.user_id(),
                "Plaintext token presented for an identity that requires encryption"
            );
            return Err(AppError::from(AuthError::InvalidToken));
        }
        Ok(())
    }
}
