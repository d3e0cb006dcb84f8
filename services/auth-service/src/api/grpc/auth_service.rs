//! AuthService gRPC 实现
//!
//! 只做协议转换：请求转成命令 / 查询交给处理器，`AppError` 转成 `Status`。

use std::sync::Arc;

use authgate_cqrs_core::{dispatch_command, dispatch_query};
use authgate_errors::AppError;
use tonic::{Request, Response, Status};

use crate::application::commands::{
    DeleteAuthCommand, LoginCommand, RefreshTokenCommand, RegisterCommand,
};
use crate::application::dto::UserInfoDto;
use crate::application::handlers::{
    DeleteAuthHandler, LoginHandler, RefreshTokenHandler, RegisterHandler, VerifyTokenHandler,
};
use crate::application::queries::VerifyTokenQuery;
use crate::domain::auth::IdentifierType;

use super::auth_proto::{self, auth_service_server::AuthService, *};

/// AuthService 实现
pub struct AuthServiceImpl {
    login_handler: Arc<LoginHandler>,
    register_handler: Arc<RegisterHandler>,
    refresh_token_handler: Arc<RefreshTokenHandler>,
    verify_token_handler: Arc<VerifyTokenHandler>,
    delete_auth_handler: Arc<DeleteAuthHandler>,
}

impl AuthServiceImpl {
    pub fn new(
        login_handler: Arc<LoginHandler>,
        register_handler: Arc<RegisterHandler>,
        refresh_token_handler: Arc<RefreshTokenHandler>,
        verify_token_handler: Arc<VerifyTokenHandler>,
        delete_auth_handler: Arc<DeleteAuthHandler>,
    ) -> Self {
        Self {
            login_handler,
            register_handler,
            refresh_token_handler,
            verify_token_handler,
            delete_auth_handler,
        }
    }
}

fn user_info_to_proto(dto: UserInfoDto) -> auth_proto::UserInfo {
    auth_proto::UserInfo {
        user_id: dto.user_id,
        name: dto.name,
        roles: dto.roles,
    }
}

fn user_info_from_proto(user_info: Option<auth_proto::UserInfo>) -> UserInfoDto {
    let user_info = user_info.unwrap_or_default();
    UserInfoDto {
        user_id: user_info.user_id,
        name: user_info.name,
        roles: user_info.roles,
    }
}

#[tonic::async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();

        let command = LoginCommand {
            identifier_type: IdentifierType::try_from(req.identifier_type)?,
            identifier_value: req.identifier_value,
            password: req.password,
        };
        let result = dispatch_command(self.login_handler.as_ref(), command).await?;

        Ok(Response::new(LoginResponse {
            success: true,
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            user_info: Some(user_info_to_proto(result.user_info)),
        }))
    }

    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let req = request.into_inner();

        if req.user_info.is_none() {
            return Err(AppError::validation("user info is required").into());
        }

        let command = RegisterCommand {
            identifier_type: IdentifierType::try_from(req.identifier_type)?,
            identifier_value: req.identifier_value,
            password: req.password,
            user_info: user_info_from_proto(req.user_info),
            encrypt_token: req.encrypt_token,
            max_token_age_seconds: req.max_token_age_seconds,
            max_wrong_attempts: req.max_wrong_attempts,
        };
        let result = dispatch_command(self.register_handler.as_ref(), command).await?;

        Ok(Response::new(RegisterResponse {
            success: true,
            identifier_type: result.identifier_type.as_i32(),
            identifier_value: result.identifier_value,
            user_info: Some(user_info_to_proto(result.user_info)),
        }))
    }

    async fn refresh_token(
        &self,
        request: Request<RefreshTokenRequest>,
    ) -> Result<Response<RefreshTokenResponse>, Status> {
        let req = request.into_inner();

        let command = RefreshTokenCommand {
            refresh_token: req.refresh_token,
        };
        let result = dispatch_command(self.refresh_token_handler.as_ref(), command).await?;

        Ok(Response::new(RefreshTokenResponse {
            success: true,
            access_token: result.access_token,
            user_info: Some(user_info_to_proto(result.user_info)),
        }))
    }

    async fn verify_token(
        &self,
        request: Request<VerifyTokenRequest>,
    ) -> Result<Response<VerifyTokenResponse>, Status> {
        let req = request.into_inner();

        let query = VerifyTokenQuery {
            access_token: req.access_token,
        };
        let user_info = dispatch_query(self.verify_token_handler.as_ref(), query).await?;

        Ok(Response::new(VerifyTokenResponse {
            success: true,
            user_info: Some(user_info_to_proto(user_info)),
        }))
    }

    async fn delete_auth(
        &self,
        request: Request<DeleteAuthRequest>,
    ) -> Result<Response<DeleteAuthResponse>, Status> {
        let req = request.into_inner();

        let command = DeleteAuthCommand {
            user_id: req.user_id,
        };
        dispatch_command(self.delete_auth_handler.as_ref(), command).await?;

        Ok(Response::new(DeleteAuthResponse { success: true }))
    }
}
