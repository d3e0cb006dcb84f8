//! AuthGate Metrics
//!
//! 业务指标记录，未安装 recorder 时为空操作。

use metrics::{counter, histogram};
use std::time::Duration;

// ============================================================================
// 登录 / 注册
// ============================================================================

/// 记录登录尝试
pub fn record_login_attempt(success: bool, encrypted: bool) {
    let labels = [
        ("success", success.to_string()),
        ("encrypted", encrypted.to_string()),
    ];

    counter!("authgate_login_attempts_total", &labels).increment(1);

    if success {
        counter!("authgate_login_success_total").increment(1);
    } else {
        counter!("authgate_login_failure_total").increment(1);
    }
}

/// 记录注册结果
///
/// `outcome`: `success` / `duplicate_user_id` / `duplicate_identifier` / `rejected` / `error`
pub fn record_registration(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!("authgate_registrations_total", &labels).increment(1);
}

/// 记录密码哈希耗时
pub fn record_password_hash_duration(duration: Duration) {
    histogram!("authgate_password_hash_duration_seconds").record(duration.as_secs_f64());
}

// ============================================================================
// 令牌
// ============================================================================

/// 记录令牌刷新
pub fn record_token_refresh(success: bool) {
    let labels = [("success", success.to_string())];
    counter!("authgate_token_refresh_total", &labels).increment(1);
}

/// 记录令牌校验
pub fn record_token_verification(success: bool) {
    let labels = [("success", success.to_string())];
    counter!("authgate_token_verifications_total", &labels).increment(1);
}

/// 记录收到的令牌是否为密文
pub fn record_token_form(operation: &str, sealed: bool) {
    let labels = [
        ("operation", operation.to_string()),
        ("sealed", sealed.to_string()),
    ];
    counter!("authgate_token_form_total", &labels).increment(1);
}

// ============================================================================
// 删除
// ============================================================================

/// 记录身份删除
pub fn record_auth_deleted(success: bool) {
    let labels = [("success", success.to_string())];
    counter!("authgate_auth_deletions_total", &labels).increment(1);
}
