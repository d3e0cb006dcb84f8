//! 持久化

mod migrations;
mod postgres_auth_repository;

pub use migrations::*;
pub use postgres_auth_repository::*;
