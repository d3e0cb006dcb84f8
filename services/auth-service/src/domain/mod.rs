//! 领域层

pub mod auth;
pub mod repositories;
pub mod services;
