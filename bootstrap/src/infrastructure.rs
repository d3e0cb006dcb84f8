//! 基础设施资源管理
//!
//! 启动时一次性装载：密钥、PostgreSQL 连接池、数据库迁移。

use std::net::SocketAddr;
use std::sync::Arc;

use authgate_adapter_postgres::{Migration, MigrationManager, check_connection, create_pool};
use authgate_auth_core::{EnvelopeService, TokenService};
use authgate_config::AppConfig;
use authgate_errors::{AppError, AppResult};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器
#[derive(Clone)]
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
    token_service: Arc<TokenService>,
    envelope_service: Arc<EnvelopeService>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    ///
    /// 密钥先于数据库装载，任何一份密钥不可用都立即失败。
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let token_service = Arc::new(TokenService::new(
            config.jwt.access_secret.expose_secret(),
            config.jwt.refresh_secret.expose_secret(),
        )?);

        let envelope_service = Arc::new(EnvelopeService::from_pem(
            config.envelope.public_key_pem.expose_secret(),
            config.envelope.private_key_pem.expose_secret(),
        )?);
        info!(
            key_bits = envelope_service.key_size() * 8,
            strict = config.envelope.strict,
            "Envelope keys loaded"
        );

        let database = &config.database;
        let postgres_pool = with_retry(&RetryConfig::default(), "PostgreSQL connection", || async move {
            let pool = create_pool(database).await?;
            check_connection(&pool).await?;
            Ok::<_, AppError>(pool)
        })
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        Ok(Self {
            config,
            postgres_pool,
            token_service,
            envelope_service,
        })
    }

    /// 执行内置迁移，`database.run_migrations = false` 时跳过
    pub async fn run_migrations(&self, migrations: &[Migration]) -> AppResult<()> {
        if !self.config.database.run_migrations {
            info!("Database migrations disabled, skipping");
            return Ok(());
        }

        let result = MigrationManager::new(self.postgres_pool.clone())
            .migrate(migrations)
            .await?;

        if let Some(failure) = result.errors.first() {
            return Err(AppError::database(format!(
                "Migration {} ({}) failed: {}",
                failure.version, failure.name, failure.error
            )));
        }

        info!(
            applied = result.applied_count(),
            skipped = result.skipped.len(),
            "Database migrations complete"
        );
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    pub fn token_service(&self) -> Arc<TokenService> {
        self.token_service.clone()
    }

    pub fn envelope_service(&self) -> Arc<EnvelopeService> {
        self.envelope_service.clone()
    }

    /// 开启加密的身份是否拒绝明文令牌
    pub fn envelope_strict(&self) -> bool {
        self.config.envelope.strict
    }

    /// gRPC 监听地址
    pub fn server_addr(&self) -> AppResult<SocketAddr> {
        let server = &self.config.server;
        format!("{}:{}", server.host, server.port)
            .parse()
            .map_err(|e| AppError::internal(format!("Invalid server address: {}", e)))
    }

    /// 关闭连接池，等待借出的连接归还
    pub async fn close(&self) {
        self.postgres_pool.close().await;
        info!("PostgreSQL connection pool closed");
    }
}
