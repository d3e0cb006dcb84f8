//! 命令

mod delete_auth_command;
mod login_command;
mod refresh_token_command;
mod register_command;

pub use delete_auth_command::*;
pub use login_command::*;
pub use refresh_token_command::*;
pub use register_command::*;
