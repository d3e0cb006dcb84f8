//! gRPC 反射服务

use authgate_errors::{AppError, AppResult};
use tonic_reflection::server::v1::{ServerReflection, ServerReflectionServer};

/// 用服务的文件描述符集构建反射服务
pub fn build_reflection(
    file_descriptor_set: &'static [u8],
) -> AppResult<ServerReflectionServer<impl ServerReflection>> {
    tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(file_descriptor_set)
        .build_v1()
        .map_err(|e| AppError::internal(format!("Failed to build reflection service: {}", e)))
}
