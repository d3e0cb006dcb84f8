//! authgate-bootstrap - 服务启动骨架
//!
//! 配置加载、日志、metrics、数据库连接与迁移、密钥装载，以及 gRPC 服务器的生命周期。

mod infrastructure;
mod reflection;
mod retry;
mod runtime;
mod starter;

pub use infrastructure::*;
pub use reflection::*;
pub use retry::*;
pub use runtime::*;
pub use starter::*;
