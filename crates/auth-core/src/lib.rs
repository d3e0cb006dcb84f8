//! authgate-auth-core - 认证核心库
//!
//! - [`TokenService`]: access / refresh 令牌的签发与校验（HMAC 签名）
//! - [`EnvelopeService`]: RSA-OAEP + AES-256-GCM 混合加密，用于对令牌做不透明化处理

mod envelope;
mod token;

pub use envelope::*;
pub use token::*;
