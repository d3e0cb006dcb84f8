//! 服务启动器

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use authgate_adapter_postgres::Migration;
use authgate_config::AppConfig;
use authgate_errors::AppResult;
use authgate_telemetry::init_metrics;
use tonic::transport::Server;
use tracing::info;

use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, load_dotenv};

/// 运行 gRPC 服务
///
/// 1. 加载 `.env` 与配置
/// 2. 初始化日志，按需启动 Prometheus 端点
/// 3. 装载密钥、连接数据库（带重试）并执行迁移
/// 4. 调用 `server_builder` 注册服务并运行服务器，直到其返回
/// 5. 关闭连接池
///
/// ```ignore
/// run_with_services("config", &migrations(), |infra, mut server| async move {
///     let addr = infra.server_addr()?;
///     server
///         .add_service(AuthServiceServer::new(service))
///         .serve_with_shutdown(addr, shutdown_signal())
///         .await
///         .map_err(|e| AppError::internal(e.to_string()))
/// })
/// .await
/// ```
pub async fn run_with_services<F, Fut>(
    config_dir: &str,
    migrations: &[Migration],
    server_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure, Server) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    load_dotenv();
    let config = AppConfig::load(config_dir)?;

    init_runtime(&config);
    info!("Starting {} service", config.app_name);

    if let Some(port) = config.telemetry.metrics_port {
        init_metrics(SocketAddr::from(([0, 0, 0, 0], port)))?;
    }

    let infra = Infrastructure::from_config(config.clone()).await?;
    infra.run_migrations(migrations).await?;

    let server =
        Server::builder().timeout(Duration::from_secs(config.server.request_timeout_secs));

    let result = server_builder(infra.clone(), server).await;

    infra.close().await;
    info!("Service stopped");

    result?;
    Ok(())
}
