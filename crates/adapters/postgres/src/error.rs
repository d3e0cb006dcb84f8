//! SQLx 错误到 AppError 的映射

use authgate_errors::AppError;

/// PostgreSQL 唯一约束冲突
const UNIQUE_VIOLATION: &str = "23505";

/// 是否为唯一约束冲突
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

/// 将 SQLx 错误转换为 AppError
///
/// 唯一约束冲突归为 Conflict，其余一律归为可重试的 Database 错误。
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        return AppError::conflict("Duplicate entry violates unique constraint");
    }

    match e {
        sqlx::Error::PoolTimedOut => AppError::database("Database connection pool timeout"),
        sqlx::Error::PoolClosed => AppError::database("Database connection pool is closed"),
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => AppError::database(format!("Database error ({}): {}", code, db_err)),
            None => AppError::database(db_err.to_string()),
        },
        other => AppError::database(other.to_string()),
    }
}
