use thiserror::Error;

use crate::models::{ProfileValidationError, StudentValidationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Valideringsfel: {0}")]
    Validation(String),

    #[error("Hittades inte: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<StudentValidationError> for AppError {
    fn from(e: StudentValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<ProfileValidationError> for AppError {
    fn from(e: ProfileValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self::Other(format!("{:#}", e))
    }
}

pub type AppResult<T> = Result<T, AppError>;
