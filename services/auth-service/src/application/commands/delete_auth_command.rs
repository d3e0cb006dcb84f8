//! 删除身份命令

use authgate_cqrs_core::Command;

#[derive(Debug, Clone)]
pub struct DeleteAuthCommand {
    pub user_id: String,
}

impl Command for DeleteAuthCommand {
    const NAME: &'static str = "delete_auth";
    type Result = ();
}
