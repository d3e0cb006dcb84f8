//! 仓储接口

mod auth_repository;

pub use auth_repository::*;
