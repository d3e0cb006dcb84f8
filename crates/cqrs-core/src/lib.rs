//! authgate-cqrs-core - CQRS 核心库
//!
//! Command/Query trait 与带日志的分发函数

mod command;
mod dispatch;
mod query;

pub use command::*;
pub use dispatch::*;
pub use query::*;
