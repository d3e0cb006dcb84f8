//! 集成测试公共设施

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use auth_service::application::commands::RegisterCommand;
use auth_service::application::dto::UserInfoDto;
use auth_service::application::handlers::{
    DeleteAuthHandler, LoginHandler, RefreshTokenHandler, RegisterHandler, VerifyTokenHandler,
};
use auth_service::application::services::TokenCipher;
use auth_service::domain::auth::{Auth, IdentifierType};
use auth_service::domain::repositories::AuthRepository;
use auth_service::domain::services::{Argon2PasswordHasher, PasswordHasher};
use auth_service::error::AuthError;
use authgate_auth_core::{EnvelopeService, TokenService};
use authgate_errors::AppResult;
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;

pub const ACCESS_SECRET: &str = "integration-access-secret";
pub const REFRESH_SECRET: &str = "integration-refresh-secret";

/// 内存仓储，唯一性约束与数据库一致
#[derive(Default)]
pub struct InMemoryAuthRepository {
    auths: Mutex<HashMap<String, Auth>>,
}

impl InMemoryAuthRepository {
    pub fn len(&self) -> usize {
        self.auths.lock().unwrap().len()
    }
}

#[async_trait]
impl AuthRepository for InMemoryAuthRepository {
    async fn save(&self, auth: &Auth) -> AppResult<()> {
        let mut auths = self.auths.lock().unwrap();
        if auths.contains_key(auth.user_id()) {
            return Err(AuthError::UserIdAlreadyExists.into());
        }
        if auths.values().any(|a| {
            a.identifier_type() == auth.identifier_type()
                && a.identifier_value() == auth.identifier_value()
        }) {
            return Err(AuthError::IdentifierAlreadyExists.into());
        }
        auths.insert(auth.user_id().to_string(), auth.clone());
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Auth>> {
        Ok(self.auths.lock().unwrap().get(user_id).cloned())
    }

    async fn find_by_identifier(
        &self,
        identifier_type: IdentifierType,
        identifier_value: &str,
    ) -> AppResult<Option<Auth>> {
        Ok(self
            .auths
            .lock()
            .unwrap()
            .values()
            .find(|a| {
                a.identifier_type() == identifier_type && a.identifier_value() == identifier_value
            })
            .cloned())
    }

    async fn delete(&self, user_id: &str) -> AppResult<()> {
        match self.auths.lock().unwrap().remove(user_id) {
            Some(_) => Ok(()),
            None => Err(AuthError::IdentityNotFound.into()),
        }
    }
}

/// 进程内共享的 RSA 密钥对，生成一次
pub fn envelope() -> Arc<EnvelopeService> {
    static ENVELOPE: OnceLock<Arc<EnvelopeService>> = OnceLock::new();
    ENVELOPE
        .get_or_init(|| {
            let key = RsaPrivateKey::new(&mut OsRng, 2048).unwrap();
            Arc::new(EnvelopeService::new(key.to_public_key(), key).unwrap())
        })
        .clone()
}

pub fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(ACCESS_SECRET, REFRESH_SECRET).unwrap())
}

/// 全部处理器，共享同一个内存仓储
pub struct Fixture {
    pub repo: Arc<InMemoryAuthRepository>,
    pub token_service: Arc<TokenService>,
    pub envelope: Arc<EnvelopeService>,
    pub login: LoginHandler,
    pub register: RegisterHandler,
    pub refresh: RefreshTokenHandler,
    pub verify: VerifyTokenHandler,
    pub delete: DeleteAuthHandler,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_strict(false)
    }

    pub fn with_strict(strict: bool) -> Self {
        let repo = Arc::new(InMemoryAuthRepository::default());
        let auth_repo: Arc<dyn AuthRepository> = repo.clone();
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
        let token_service = token_service();
        let envelope = envelope();
        let cipher = TokenCipher::new(envelope.clone(), strict);

        Self {
            login: LoginHandler::new(
                auth_repo.clone(),
                hasher.clone(),
                token_service.clone(),
                cipher.clone(),
            ),
            register: RegisterHandler::new(auth_repo.clone(), hasher),
            refresh: RefreshTokenHandler::new(
                auth_repo.clone(),
                token_service.clone(),
                cipher.clone(),
            ),
            verify: VerifyTokenHandler::new(auth_repo.clone(), token_service.clone(), cipher),
            delete: DeleteAuthHandler::new(auth_repo),
            repo,
            token_service,
            envelope,
        }
    }
}

pub fn register_command(user_id: &str, identifier_value: &str, encrypt_token: bool) -> RegisterCommand {
    RegisterCommand {
        identifier_type: IdentifierType::Email,
        identifier_value: identifier_value.to_string(),
        password: "x".to_string(),
        user_info: UserInfoDto {
            user_id: user_id.to_string(),
            name: "Ana".to_string(),
            roles: vec!["admin".to_string(), "user".to_string()],
        },
        encrypt_token,
        max_token_age_seconds: None,
        max_wrong_attempts: None,
    }
}
