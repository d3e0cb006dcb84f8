//! 领域服务

mod password_service;

pub use password_service::*;
