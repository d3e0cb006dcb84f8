//! 密码服务

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use authgate_errors::{AppError, AppResult};

/// 占位哈希，参数与 `Argon2::default()` 相同
///
/// 登录标识不存在时用它做一次校验，使耗时与密码错误一致。
pub const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// 密码哈希
pub trait PasswordHasher: Send + Sync {
    /// 生成带随机盐的哈希
    fn hash(&self, plain: &str) -> AppResult<String>;

    /// 校验明文与哈希是否匹配；哈希本身无法解析时返回错误
    fn verify(&self, plain: &str, hash: &str) -> AppResult<bool>;
}

/// Argon2id 实现，哈希以 PHC 字符串保存
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, plain: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash: {}", e)))?;

        match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Failed to verify password: {}",
                e
            ))),
        }
    }
}
