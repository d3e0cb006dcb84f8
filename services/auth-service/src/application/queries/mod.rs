//! 查询

mod verify_token_query;

pub use verify_token_query::*;
