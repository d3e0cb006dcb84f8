//! 删除身份处理器

use std::sync::Arc;

use async_trait::async_trait;
use authgate_cqrs_core::CommandHandler;
use authgate_errors::{AppError, AppResult};
use tracing::info;

use crate::application::commands::DeleteAuthCommand;
use crate::domain::repositories::AuthRepository;
use crate::infrastructure::observability::metrics;

pub struct DeleteAuthHandler {
    auth_repo: Arc<dyn AuthRepository>,
}

impl DeleteAuthHandler {
    pub fn new(auth_repo: Arc<dyn AuthRepository>) -> Self {
        Self { auth_repo }
    }
}

#[async_trait]
impl CommandHandler<DeleteAuthCommand> for DeleteAuthHandler {
    async fn handle(&self, command: DeleteAuthCommand) -> AppResult<()> {
        if command.user_id.is_empty() {
            return Err(AppError::validation("user ID is required"));
        }

        let result = self.auth_repo.delete(&command.user_id).await;
        metrics::record_auth_deleted(result.is_ok());
        result?;

        info!(user_id = %command.user_id, "Auth deleted");
        Ok(())
    }
}
