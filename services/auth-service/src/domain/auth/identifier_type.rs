//! 登录标识类型

use std::fmt;

use authgate_errors::AppError;

/// 登录标识类型，数值与线上协议一致
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IdentifierType {
    #[default]
    Unspecified = 0,
    Email = 1,
    Cpf = 2,
    Cnpj = 3,
    Phone = 4,
}

impl IdentifierType {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Email => "email",
            Self::Cpf => "CPF",
            Self::Cnpj => "CNPJ",
            Self::Phone => "phone",
        }
    }
}

impl TryFrom<i32> for IdentifierType {
    type Error = AppError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unspecified),
            1 => Ok(Self::Email),
            2 => Ok(Self::Cpf),
            3 => Ok(Self::Cnpj),
            4 => Ok(Self::Phone),
            other => Err(AppError::validation(format!(
                "Unknown identifier type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
