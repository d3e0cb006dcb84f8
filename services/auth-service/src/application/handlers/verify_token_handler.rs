//! 令牌校验处理器

use std::sync::Arc;

use async_trait::async_trait;
use authgate_auth_core::TokenService;
use authgate_cqrs_core::QueryHandler;
use authgate_errors::{AppError, AppResult};
use tracing::debug;

use crate::application::dto::UserInfoDto;
use crate::application::queries::VerifyTokenQuery;
use crate::application::services::TokenCipher;
use crate::domain::repositories::AuthRepository;
use crate::error::AuthError;
use crate::infrastructure::observability::metrics;

pub struct VerifyTokenHandler {
    auth_repo: Arc<dyn AuthRepository>,
    token_service: Arc<TokenService>,
    token_cipher: TokenCipher,
}

impl VerifyTokenHandler {
    pub fn new(
        auth_repo: Arc<dyn AuthRepository>,
        token_service: Arc<TokenService>,
        token_cipher: TokenCipher,
    ) -> Self {
        Self {
            auth_repo,
            token_service,
            token_cipher,
        }
    }

    async fn verify(&self, access_token: &str) -> AppResult<UserInfoDto> {
        if access_token.is_empty() {
            return Err(AppError::validation("access token is required"));
        }

        let opened = self.token_cipher.open(access_token);
        metrics::record_token_form("verify_token", opened.was_sealed);

        // refresh 令牌使用另一份密钥签名，在这里验签即失败
        let claims = self.token_service.extract_claims(&opened.token).map_err(|e| {
            debug!(error = %e, "Access token rejected");
            AppError::from(AuthError::InvalidToken)
        })?;

        let auth = self
            .auth_repo
            .find_by_user_id(&claims.sub)
            .await?
            .ok_or(AuthError::IdentityNotFound)?;

        self.token_cipher.ensure_form(&opened, &auth)?;

        debug!(user_id = %auth.user_id(), "Access token verified");
        Ok(UserInfoDto::from(auth.user_info()))
    }
}

#[async_trait]
impl QueryHandler<VerifyTokenQuery> for VerifyTokenHandler {
    async fn handle(&self, query: VerifyTokenQuery) -> AppResult<UserInfoDto> {
        let result = self.verify(&query.access_token).await;
        metrics::record_token_verification(result.is_ok());
        result
    }
}
