//! gRPC 服务实现

pub mod auth_service;

// Proto 生成的代码模块
pub mod auth_proto {
    include!("proto_gen/authgate.auth.v1.rs");
    pub const FILE_DESCRIPTOR_SET: &[u8] = include_bytes!("proto_gen/auth_descriptor.bin");
}
