//! PostgreSQL 身份仓储实现

use async_trait::async_trait;
use authgate_adapter_postgres::{is_unique_violation, map_sqlx_error};
use authgate_errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::auth::{Auth, AuthId, AuthProps, IdentifierType, UserInfo};
use crate::domain::repositories::AuthRepository;
use crate::error::AuthError;

const SELECT_AUTH: &str = r#"
    SELECT a.id, a.identifier_type, a.identifier_value, a.password_hash,
           a.encrypt_token, a.last_login_at, a.wrong_attempts, a.max_wrong_attempts,
           a.recovery_token, a.max_token_age_seconds,
           u.user_id, u.name, u.roles
    FROM auths a
    INNER JOIN user_infos u ON u.auth_id = a.id
"#;

const IDENTIFIER_UNIQUE_CONSTRAINT: &str = "auths_identifier_unique";
const USER_ID_PRIMARY_KEY: &str = "user_infos_pkey";

#[derive(Debug, sqlx::FromRow)]
struct AuthRow {
    id: Uuid,
    identifier_type: i32,
    identifier_value: String,
    password_hash: String,
    encrypt_token: bool,
    last_login_at: Option<DateTime<Utc>>,
    wrong_attempts: i32,
    max_wrong_attempts: i32,
    recovery_token: Option<String>,
    max_token_age_seconds: i64,
    user_id: String,
    name: String,
    roles: Vec<String>,
}

impl AuthRow {
    /// 经由 `Auth::load` 重建，损坏的行视为存储故障
    fn into_auth(self) -> AppResult<Auth> {
        let id = self.id;
        let corrupted = |e: AppError| {
            warn!(auth_id = %id, error = %e, "Corrupted auth row");
            AppError::database(format!("Corrupted auth row {}: {}", id, e))
        };

        let identifier_type = IdentifierType::try_from(self.identifier_type).map_err(corrupted)?;
        let user_info = UserInfo::new(self.user_id, self.name, self.roles).map_err(corrupted)?;

        Auth::load(AuthProps {
            id: Some(AuthId(self.id)),
            identifier_type,
            identifier_value: self.identifier_value,
            password_hash: self.password_hash,
            user_info: Some(user_info),
            encrypt_token: self.encrypt_token,
            last_login_at: self.last_login_at,
            wrong_attempts: self.wrong_attempts,
            max_wrong_attempts: Some(self.max_wrong_attempts),
            recovery_token: self.recovery_token,
            max_token_age_seconds: Some(self.max_token_age_seconds),
        })
        .map_err(corrupted)
    }
}

/// 插入冲突按约束名细分
fn map_save_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        let constraint = match &e {
            sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_string),
            _ => None,
        };
        return match constraint.as_deref() {
            Some(IDENTIFIER_UNIQUE_CONSTRAINT) => AuthError::IdentifierAlreadyExists.into(),
            Some(USER_ID_PRIMARY_KEY) => AuthError::UserIdAlreadyExists.into(),
            _ => map_sqlx_error(e),
        };
    }
    map_sqlx_error(e)
}

/// PostgreSQL 身份仓储
pub struct PostgresAuthRepository {
    pool: PgPool,
}

impl PostgresAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthRepository for PostgresAuthRepository {
    async fn save(&self, auth: &Auth) -> AppResult<()> {
        debug!(auth_id = %auth.id(), user_id = %auth.user_id(), "Saving auth");

        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            INSERT INTO auths (
                id, identifier_type, identifier_value, password_hash, encrypt_token,
                last_login_at, wrong_attempts, max_wrong_attempts, recovery_token,
                max_token_age_seconds
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(auth.id().0)
        .bind(auth.identifier_type().as_i32())
        .bind(auth.identifier_value())
        .bind(auth.password_hash())
        .bind(auth.encrypt_token())
        .bind(auth.last_login_at())
        .bind(auth.wrong_attempts())
        .bind(auth.max_wrong_attempts())
        .bind(auth.recovery_token())
        .bind(auth.max_token_age_seconds())
        .execute(&mut *tx)
        .await
        .map_err(map_save_error)?;

        sqlx::query("INSERT INTO user_infos (user_id, auth_id, name, roles) VALUES ($1, $2, $3, $4)")
            .bind(auth.user_id())
            .bind(auth.id().0)
            .bind(auth.user_info().name())
            .bind(auth.user_info().roles())
            .execute(&mut *tx)
            .await
            .map_err(map_save_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(auth_id = %auth.id(), "Auth saved");
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Auth>> {
        let sql = format!("{} WHERE u.user_id = $1", SELECT_AUTH);

        let row = sqlx::query_as::<_, AuthRow>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(AuthRow::into_auth).transpose()
    }

    async fn find_by_identifier(
        &self,
        identifier_type: IdentifierType,
        identifier_value: &str,
    ) -> AppResult<Option<Auth>> {
        let sql = format!(
            "{} WHERE a.identifier_type = $1 AND a.identifier_value = $2",
            SELECT_AUTH
        );

        let row = sqlx::query_as::<_, AuthRow>(&sql)
            .bind(identifier_type.as_i32())
            .bind(identifier_value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(AuthRow::into_auth).transpose()
    }

    async fn delete(&self, user_id: &str) -> AppResult<()> {
        // user_infos 随 auths 级联删除
        let result = sqlx::query(
            "DELETE FROM auths WHERE id = (SELECT auth_id FROM user_infos WHERE user_id = $1)",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::IdentityNotFound.into());
        }

        debug!(user_id = %user_id, "Auth deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> AuthRow {
        AuthRow {
            id: Uuid::new_v4(),
            identifier_type: 1,
            identifier_value: "a@b.com".to_string(),
            password_hash: "hash".to_string(),
            encrypt_token: true,
            last_login_at: None,
            wrong_attempts: 0,
            max_wrong_attempts: 5,
            recovery_token: None,
            max_token_age_seconds: 3600,
            user_id: "u1".to_string(),
            name: "Ana".to_string(),
            roles: vec!["admin".to_string()],
        }
    }

    #[test]
    fn test_row_rebuilds_aggregate() {
        let row = row();
        let id = row.id;
        let auth = row.into_auth().unwrap();

        assert_eq!(auth.id(), AuthId(id));
        assert_eq!(auth.identifier_type(), IdentifierType::Email);
        assert_eq!(auth.max_token_age_seconds(), 3600);
        assert_eq!(auth.user_info().roles(), ["admin".to_string()]);
        assert!(auth.encrypt_token());
    }

    #[test]
    fn test_corrupted_rows_are_storage_errors() {
        let corrupted = [
            AuthRow {
                identifier_type: 0,
                ..row()
            },
            AuthRow {
                identifier_type: 42,
                ..row()
            },
            AuthRow {
                password_hash: String::new(),
                ..row()
            },
            AuthRow {
                user_id: String::new(),
                ..row()
            },
        ];

        for row in corrupted {
            let err = row.into_auth().unwrap_err();
            assert!(matches!(err, AppError::Database(_)));
        }
    }
}
