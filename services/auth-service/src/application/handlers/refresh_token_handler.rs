//! 刷新令牌处理器

use std::sync::Arc;

use async_trait::async_trait;
use authgate_auth_core::TokenService;
use authgate_cqrs_core::CommandHandler;
use authgate_errors::{AppError, AppResult};
use tracing::{debug, info};

use crate::application::commands::{RefreshTokenCommand, RefreshTokenResult};
use crate::application::dto::UserInfoDto;
use crate::application::services::TokenCipher;
use crate::domain::repositories::AuthRepository;
use crate::error::AuthError;
use crate::infrastructure::observability::metrics;

pub struct RefreshTokenHandler {
    auth_repo: Arc<dyn AuthRepository>,
    token_service: Arc<TokenService>,
    token_cipher: TokenCipher,
}

impl RefreshTokenHandler {
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

    async fn refresh(&self, refresh_token: &str) -> AppResult<RefreshTokenResult> {
        if refresh_token.is_empty() {
            return Err(AppError::validation("refresh token is required"));
        }

        let opened = self.token_cipher.open(refresh_token);
        metrics::record_token_form("refresh_token", opened.was_sealed);

        let claims = self
            .token_service
            .extract_refresh_claims(&opened.token)
            .map_err(|e| {
                debug!(error = %e, "Refresh token rejected");
                AppError::from(AuthError::InvalidToken)
            })?;

        let auth = self
            .auth_repo
            .find_by_user_id(&claims.sub)
            .await?
            .ok_or(AuthError::IdentityNotFound)?;

        self.token_cipher.ensure_form(&opened, &auth)?;

        let access_token = self.token_service.generate_access_token(
            auth.user_id(),
            auth.user_info().roles(),
            auth.max_token_age_seconds(),
        )?;
        let access_token = self.token_cipher.seal(access_token, auth.encrypt_token())?;

        info!(user_id = %auth.user_id(), "Access token refreshed");

        Ok(RefreshTokenResult {
            access_token,
            user_info: UserInfoDto::from(auth.user_info()),
        })
    }
}

#[async_trait]
impl CommandHandler<RefreshTokenCommand> for RefreshTokenHandler {
    async fn handle(&self, command: RefreshTokenCommand) -> AppResult<RefreshTokenResult> {
        let result = self.refresh(&command.refresh_token).await;
        metrics::record_token_refresh(result.is_ok());
        result
    }
}
