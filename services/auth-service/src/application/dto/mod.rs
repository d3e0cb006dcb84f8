//! DTO

mod user_info_dto;

pub use user_info_dto::*;
