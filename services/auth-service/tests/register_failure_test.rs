//! 注册时仓储出现技术故障的处理

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use authgate_cqrs_core::CommandHandler;
use authgate_errors::{AppError, AppResult};
use auth_service::application::handlers::RegisterHandler;
use auth_service::domain::auth::{Auth, AuthProps, IdentifierType, UserInfo};
use auth_service::domain::repositories::AuthRepository;
use auth_service::domain::services::{Argon2PasswordHasher, PasswordHasher};
use mockall::mock;

use common::register_command;

mock! {
    pub AuthRepo {}

    #[async_trait]
    impl AuthRepository for AuthRepo {
        async fn save(&self, auth: &Auth) -> AppResult<()>;
        async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Auth>>;
        async fn find_by_identifier(
            &self,
            identifier_type: IdentifierType,
            identifier_value: &str,
        ) -> AppResult<Option<Auth>>;
        async fn delete(&self, user_id: &str) -> AppResult<()>;
    }
}

fn existing() -> Auth {
    Auth::new(AuthProps {
        identifier_type: IdentifierType::Email,
        identifier_value: "a@b.com".to_string(),
        password_hash: "hash".to_string(),
        user_info: Some(UserInfo::new("u1", "", vec![]).unwrap()),
        ..Default::default()
    })
    .unwrap()
}

fn handler(repo: MockAuthRepo) -> RegisterHandler {
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    RegisterHandler::new(Arc::new(repo), hasher)
}

#[tokio::test]
async fn test_lookup_failure_is_not_treated_as_absent() {
    let mut repo = MockAuthRepo::new();
    repo.expect_find_by_user_id()
        .returning(|_| Err(AppError::database("connection reset")));
    repo.expect_find_by_identifier().returning(|_, _| Ok(None));
    repo.expect_save().never();

    let err = handler(repo)
        .handle(register_command("u1", "a@b.com", false))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Database(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_both_lookups_run_even_when_one_fails() {
    let mut repo = MockAuthRepo::new();
    repo.expect_find_by_user_id().returning(|_| Ok(None));
    repo.expect_find_by_identifier()
        .times(1)
        .returning(|_, _| Err(AppError::database("timeout")));
    repo.expect_save().never();

    let err = handler(repo)
        .handle(register_command("u1", "a@b.com", false))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_conflict_wins_over_lookup_failure() {
    let mut repo = MockAuthRepo::new();
    repo.expect_find_by_user_id()
        .returning(|_| Err(AppError::database("timeout")));
    repo.expect_find_by_identifier()
        .returning(|_, _| Ok(Some(existing())));
    repo.expect_save().never();

    let err = handler(repo)
        .handle(register_command("u2", "a@b.com", false))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert!(err.to_string().contains("Identifier already exists"));
}

#[tokio::test]
async fn test_save_conflict_from_storage_is_propagated() {
    // 两次查询之间的并发注册由存储层唯一约束兜底
    let mut repo = MockAuthRepo::new();
    repo.expect_find_by_user_id().returning(|_| Ok(None));
    repo.expect_find_by_identifier().returning(|_, _| Ok(None));
    repo.expect_save()
        .times(1)
        .returning(|_| Err(AppError::conflict("Identifier already exists")));

    let err = handler(repo)
        .handle(register_command("u1", "a@b.com", false))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_saved_identity_carries_hash_not_password() {
    let mut repo = MockAuthRepo::new();
    repo.expect_find_by_user_id().returning(|_| Ok(None));
    repo.expect_find_by_identifier().returning(|_, _| Ok(None));
    repo.expect_save()
        .withf(|auth| {
            auth.password_hash() != "x"
                && auth.password_hash().starts_with("$argon2")
                && auth.max_wrong_attempts() == 5
                && auth.max_token_age_seconds() == 604_800
        })
        .times(1)
        .returning(|_| Ok(()));

    let result = handler(repo)
        .handle(register_command("u1", "a@b.com", false))
        .await
        .unwrap();
    assert_eq!(result.user_info.user_id, "u1");
}
