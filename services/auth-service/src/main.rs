//! Auth Service - 认证服务入口
//!
//! 使用 authgate-bootstrap 统一启动模式

use std::sync::Arc;

use auth_service::api::grpc::auth_proto::FILE_DESCRIPTOR_SET;
use auth_service::api::grpc::auth_proto::auth_service_server::AuthServiceServer;
use auth_service::api::grpc::auth_service::AuthServiceImpl;
use auth_service::application::handlers::{
    DeleteAuthHandler, LoginHandler, RefreshTokenHandler, RegisterHandler, VerifyTokenHandler,
};
use auth_service::application::services::TokenCipher;
use auth_service::domain::repositories::AuthRepository;
use auth_service::domain::services::{Argon2PasswordHasher, PasswordHasher};
use auth_service::infrastructure::persistence::{PostgresAuthRepository, migrations};
use authgate_bootstrap::{Infrastructure, build_reflection, run_with_services, shutdown_signal};
use authgate_errors::AppError;
use tonic::transport::Server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_with_services(
        "config",
        &migrations(),
        |infra: Infrastructure, mut server: Server| async move {
            let addr = infra.server_addr()?;
            let token_service = infra.token_service();

            // 组装 Repository 与密码哈希（依赖 domain trait）
            let auth_repo: Arc<dyn AuthRepository> =
                Arc::new(PostgresAuthRepository::new(infra.postgres_pool()));
            let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
            let token_cipher = TokenCipher::new(infra.envelope_service(), infra.envelope_strict());

            // 组装 Handlers
            let login_handler = Arc::new(LoginHandler::new(
                auth_repo.clone(),
                password_hasher.clone(),
                token_service.clone(),
                token_cipher.clone(),
            ));
            let register_handler = Arc::new(RegisterHandler::new(
                auth_repo.clone(),
                password_hasher,
            ));
            let refresh_token_handler = Arc::new(RefreshTokenHandler::new(
                auth_repo.clone(),
                token_service.clone(),
                token_cipher.clone(),
            ));
            let verify_token_handler = Arc::new(VerifyTokenHandler::new(
                auth_repo.clone(),
                token_service,
                token_cipher,
            ));
            let delete_auth_handler = Arc::new(DeleteAuthHandler::new(auth_repo));

            let auth_service = AuthServiceImpl::new(
                login_handler,
                register_handler,
                refresh_token_handler,
                verify_token_handler,
                delete_auth_handler,
            );

            server
                .add_service(AuthServiceServer::new(auth_service))
                .add_service(build_reflection(FILE_DESCRIPTOR_SET)?)
                .serve_with_shutdown(addr, shutdown_signal())
                .await
                .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

            Ok(())
        },
    )
    .await
}
