//! Auth Service Library
//!
//! 分层结构：
//! - `domain`: 身份聚合、仓储与密码哈希接口
//! - `application`: 五个操作的命令 / 查询及处理器
//! - `infrastructure`: PostgreSQL 仓储、迁移与指标
//! - `api`: gRPC 协议转换

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
