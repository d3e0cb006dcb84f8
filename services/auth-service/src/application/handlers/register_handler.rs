//! 注册处理器

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use authgate_auth_core::MAX_ACCESS_TOKEN_TTL_SECS;
use authgate_cqrs_core::CommandHandler;
use authgate_errors::{AppError, AppResult};
use tracing::{info, warn};

use crate::application::commands::{RegisterCommand, RegisterResult};
use crate::application::dto::UserInfoDto;
use crate::domain::auth::{Auth, AuthProps, UserInfo};
use crate::domain::repositories::AuthRepository;
use crate::domain::services::PasswordHasher;
use crate::error::AuthError;
use crate::infrastructure::observability::metrics;

pub struct RegisterHandler {
    auth_repo: Arc<dyn AuthRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl RegisterHandler {
    pub fn new(
        auth_repo: Arc<dyn AuthRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            auth_repo,
            password_hasher,
        }
    }

    fn validate(command: &RegisterCommand) -> AppResult<()> {
        if command.identifier_value.is_empty() || command.password.is_empty() {
            return Err(AppError::validation(
                "identifier type, identifier value, and password are required",
            ));
        }
        if matches!(command.max_token_age_seconds, Some(v) if v <= 0) {
            return Err(AppError::validation(
                "max token age seconds must be positive",
            ));
        }
        if matches!(command.max_token_age_seconds, Some(v) if v > MAX_ACCESS_TOKEN_TTL_SECS) {
            return Err(AppError::validation(format!(
                "max token age seconds must not exceed {}",
                MAX_ACCESS_TOKEN_TTL_SECS
            )));
        }
        if matches!(command.max_wrong_attempts, Some(v) if v <= 0) {
            return Err(AppError::validation("max wrong attempts must be positive"));
        }
        Ok(())
    }

    /// 并发查询用户 ID 与登录标识，两者都返回后再做判断
    ///
    /// 冲突优先于查询错误：任何一边确认已存在即拒绝，
    /// 否则任何一边的技术错误都原样上抛（可重试），不会当作"不存在"。
    async fn ensure_unique(&self, command: &RegisterCommand) -> AppResult<()> {
        let (by_user_id, by_identifier) = tokio::join!(
            self.auth_repo.find_by_user_id(&command.user_info.user_id),
            self.auth_repo
                .find_by_identifier(command.identifier_type, &command.identifier_value),
        );

        if matches!(by_user_id, Ok(Some(_))) {
            metrics::record_registration("duplicate_user_id");
            return Err(AuthError::UserIdAlreadyExists.into());
        }
        if matches!(by_identifier, Ok(Some(_))) {
            metrics::record_registration("duplicate_identifier");
            return Err(AuthError::IdentifierAlreadyExists.into());
        }

        by_user_id?;
        by_identifier?;
        Ok(())
    }
}

#[async_trait]
impl CommandHandler<RegisterCommand> for RegisterHandler {
    async fn handle(&self, command: RegisterCommand) -> AppResult<RegisterResult> {
        if let Err(e) = Self::validate(&command) {
            metrics::record_registration("rejected");
            return Err(e);
        }

        if let Err(e) = self.ensure_unique(&command).await {
            if !matches!(e, AppError::Conflict(_)) {
                metrics::record_registration("error");
            }
            warn!(
                user_id = %command.user_info.user_id,
                identifier_type = %command.identifier_type,
                error = %e,
                "Registration rejected"
            );
            return Err(e);
        }

        let user_info = UserInfo::new(
            command.user_info.user_id,
            command.user_info.name,
            command.user_info.roles,
        )?;

        let started = Instant::now();
        let password_hash = self.password_hasher.hash(&command.password)?;
        metrics::record_password_hash_duration(started.elapsed());

        let auth = Auth::new(AuthProps {
            identifier_type: command.identifier_type,
            identifier_value: command.identifier_value,
            password_hash,
            user_info: Some(user_info),
            encrypt_token: command.encrypt_token,
            max_token_age_seconds: command.max_token_age_seconds,
            max_wrong_attempts: command.max_wrong_attempts,
            ..Default::default()
        })?;

        self.auth_repo.save(&auth).await?;

        metrics::record_registration("success");
        info!(
            auth_id = %auth.id(),
            user_id = %auth.user_id(),
            identifier_type = %auth.identifier_type(),
            encrypt_token = auth.encrypt_token(),
            "Auth registered"
        );

        Ok(RegisterResult {
            identifier_type: auth.identifier_type(),
            identifier_value: auth.identifier_value().to_string(),
            user_info: UserInfoDto::from(auth.user_info()),
        })
    }
}
