//! 服务错误定义

use authgate_errors::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// 标识不存在与密码错误统一为同一个错误，避免泄露标识是否已注册
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User ID already exists")]
    UserIdAlreadyExists,

    #[error("Identifier already exists")]
    IdentifierAlreadyExists,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Auth not found")]
    IdentityNotFound,

    #[error("Failed to encrypt token")]
    TokenEncryptionFailed,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::unauthenticated(err.to_string()),
            AuthError::UserIdAlreadyExists => AppError::conflict(err.to_string()),
            AuthError::IdentifierAlreadyExists => AppError::conflict(err.to_string()),
            AuthError::InvalidToken => AppError::unauthenticated(err.to_string()),
            AuthError::IdentityNotFound => AppError::not_found(err.to_string()),
            AuthError::TokenEncryptionFailed => AppError::crypto(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authgate_errors::ErrorKind;

    #[test]
    fn test_classification() {
        let err: AppError = AuthError::InvalidCredentials.into();
        assert!(matches!(err, AppError::Unauthenticated(_)));
        assert_eq!(err.kind(), ErrorKind::BusinessRule);

        let err: AppError = AuthError::IdentifierAlreadyExists.into();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(err.to_string().contains("Identifier already exists"));

        let err: AppError = AuthError::IdentityNotFound.into();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err: AppError = AuthError::TokenEncryptionFailed.into();
        assert!(err.is_retryable());
    }
}
