//! 身份聚合

mod auth;
mod identifier_type;
mod user_info;

pub use auth::*;
pub use identifier_type::*;
pub use user_info::*;
