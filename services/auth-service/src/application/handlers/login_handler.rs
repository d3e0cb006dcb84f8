//! 登录处理器

use std::sync::Arc;

use async_trait::async_trait;
use authgate_auth_core::TokenService;
use authgate_cqrs_core::CommandHandler;
use authgate_errors::AppResult;
use tracing::{info, warn};

use crate::application::commands::{LoginCommand, LoginResult};
use crate::application::dto::UserInfoDto;
use crate::application::services::TokenCipher;
use crate::domain::repositories::AuthRepository;
use crate::domain::services::{DUMMY_PASSWORD_HASH, PasswordHasher};
use crate::error::AuthError;
use crate::infrastructure::observability::metrics;

pub struct LoginHandler {
    auth_repo: Arc<dyn AuthRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service: Arc<TokenService>,
    token_cipher: TokenCipher,
}

impl LoginHandler {
    pub fn new(
        auth_repo: Arc<dyn AuthRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_service: Arc<TokenService>,
        token_cipher: TokenCipher,
    ) -> Self {
        Self {
            auth_repo,
            password_hasher,
            token_service,
            token_cipher,
        }
    }
}

#[async_trait]
impl CommandHandler<LoginCommand> for LoginHandler {
    async fn handle(&self, command: LoginCommand) -> AppResult<LoginResult> {
        info!(identifier_type = %command.identifier_type, "Login attempt");

        // 标识不存在与密码错误返回同一个错误
        let Some(auth) = self
            .auth_repo
            .find_by_identifier(command.identifier_type, &command.identifier_value)
            .await?
        else {
            // 结果无意义，只为与密码错误耗时一致
            let _ = self
                .password_hasher
                .verify(&command.password, DUMMY_PASSWORD_HASH);
            warn!(identifier_type = %command.identifier_type, "Login failed: unknown identifier");
            metrics::record_login_attempt(false, false);
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self
            .password_hasher
            .verify(&command.password, auth.password_hash())?
        {
            warn!(user_id = %auth.user_id(), "Login failed: wrong password");
            metrics::record_login_attempt(false, auth.encrypt_token());
            return Err(AuthError::InvalidCredentials.into());
        }

        let access_token = self.token_service.generate_access_token(
            auth.user_id(),
            auth.user_info().roles(),
            auth.max_token_age_seconds(),
        )?;
        let refresh_token = self.token_service.generate_refresh_token(auth.user_id())?;

        let access_token = self.token_cipher.seal(access_token, auth.encrypt_token())?;
        let refresh_token = self.token_cipher.seal(refresh_token, auth.encrypt_token())?;

        metrics::record_login_attempt(true, auth.encrypt_token());
        info!(
            user_id = %auth.user_id(),
            encrypted = auth.encrypt_token(),
            "Login succeeded"
        );

        Ok(LoginResult {
            access_token,
            refresh_token,
            user_info: UserInfoDto::from(auth.user_info()),
        })
    }
}
