//! 登录失败路径

mod common;

use std::sync::Arc;

use authgate_cqrs_core::CommandHandler;
use authgate_errors::{AppError, AppResult};
use auth_service::application::commands::LoginCommand;
use auth_service::application::handlers::LoginHandler;
use auth_service::application::services::TokenCipher;
use auth_service::domain::auth::{Auth, AuthProps, IdentifierType, UserInfo};
use auth_service::domain::repositories::AuthRepository;
use auth_service::domain::services::{
    Argon2PasswordHasher, DUMMY_PASSWORD_HASH, PasswordHasher,
};
use mockall::mock;

use common::{InMemoryAuthRepository, envelope, token_service};

mock! {
    pub Hasher {}

    impl PasswordHasher for Hasher {
        fn hash(&self, plain: &str) -> AppResult<String>;
        fn verify(&self, plain: &str, hash: &str) -> AppResult<bool>;
    }
}

fn login_handler(repo: Arc<InMemoryAuthRepository>, hasher: Arc<dyn PasswordHasher>) -> LoginHandler {
    LoginHandler::new(
        repo,
        hasher,
        token_service(),
        TokenCipher::new(envelope(), false),
    )
}

fn login_command(identifier_value: &str) -> LoginCommand {
    LoginCommand {
        identifier_type: IdentifierType::Email,
        identifier_value: identifier_value.to_string(),
        password: "x".to_string(),
    }
}

#[tokio::test]
async fn test_unknown_identifier_still_runs_password_verification() {
    let mut hasher = MockHasher::new();
    hasher
        .expect_verify()
        .withf(|plain, hash| plain.to_string() == "x" && hash.to_string() == DUMMY_PASSWORD_HASH)
        .times(1)
        .returning(|_, _| Ok(false));

    let handler = login_handler(Arc::new(InMemoryAuthRepository::default()), Arc::new(hasher));
    let err = handler.handle(login_command("nobody@b.com")).await.unwrap_err();

    assert!(matches!(err, AppError::Unauthenticated(_)));
}

#[tokio::test]
async fn test_stored_token_age_out_of_range_is_a_typed_error() {
    let hasher = Argon2PasswordHasher;
    let repo = Arc::new(InMemoryAuthRepository::default());

    // 绕过注册校验直接写入，模拟历史数据
    let auth = Auth::new(AuthProps {
        identifier_type: IdentifierType::Email,
        identifier_value: "a@b.com".to_string(),
        password_hash: hasher.hash("x").unwrap(),
        user_info: Some(UserInfo::new("u1", "", vec![]).unwrap()),
        max_token_age_seconds: Some(i64::MAX),
        ..Default::default()
    })
    .unwrap();
    repo.save(&auth).await.unwrap();

    let handler = login_handler(repo, Arc::new(hasher));
    let err = handler.handle(login_command("a@b.com")).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}
