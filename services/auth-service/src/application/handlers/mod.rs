//! 命令 / 查询处理器

mod delete_auth_handler;
mod login_handler;
mod refresh_token_handler;
mod register_handler;
mod verify_token_handler;

pub use delete_auth_handler::*;
pub use login_handler::*;
pub use refresh_token_handler::*;
pub use register_handler::*;
pub use verify_token_handler::*;
