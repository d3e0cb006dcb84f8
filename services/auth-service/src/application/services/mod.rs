//! 应用服务

mod token_cipher;

pub use token_cipher::*;
