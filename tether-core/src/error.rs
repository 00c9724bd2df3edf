use std::borrow::Cow;

use thiserror::Error;

use crate::status::StatusCode;

#[derive(Clone, Debug, Error)]
pub enum Error {
    #[error("Failed: {0}")]
    Failed(Cow<'static, str>),
    #[error("Invalid: {0}")]
    Invalid(Cow<'static, str>),
    #[error("Invalid parameter: {0} {1}")]
    InvalidParameter(Cow<'static, str>, Cow<'static, str>),
    #[error("Not found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Initialization failed: {0}")]
    InitializationFailed(Cow<'static, str>),
    #[error("Terminated: {0}")]
    Terminated(Cow<'static, str>),
    #[error("Device status {0}")]
    Device(StatusCode),
}

impl From<StatusCode> for Error {
    fn from(status: StatusCode) -> Self {
        Error::Device(status)
    }
}

#[macro_export]
macro_rules! failed_error {
    ($param:literal) => {
        $crate::error::Error::Failed($param.into())
    };
    ($param:expr) => {
        $crate::error::Error::Failed(format!("{:?}", $param).into())
    };
}

#[macro_export]
macro_rules! invalid_param_error {
    ($param:expr) => {
        $crate::error::Error::InvalidParameter(stringify!($param).into(), format!("{:?}", $param).into())
    };
}

#[macro_export]
macro_rules! not_found_error {
    ($param:literal) => {
        $crate::error::Error::NotFound($param.into())
    };
    ($param:expr) => {
        $crate::error::Error::NotFound(format!("{:?}", $param).into())
    };
}
