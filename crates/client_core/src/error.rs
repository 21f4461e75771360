use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally before any request was sent.
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Conflict(String),
    /// Any other non-2xx answer, or a transport/decoding failure (`status: None`).
    #[error("{message}")]
    Service {
        status: Option<u16>,
        message: String,
    },
    #[error("session storage error: {0}")]
    Session(String),
}

impl ClientError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Maps a non-2xx status and its (already extracted) message.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match ErrorCode::from_status(status) {
            ErrorCode::Unauthorized => Self::Unauthorized(message),
            ErrorCode::Conflict => Self::Conflict(message),
            _ => Self::Service {
                status: Some(status),
                message,
            },
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Service {
            status: None,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::Unauthorized(_) => ErrorCode::Unauthorized,
            Self::Conflict(_) => ErrorCode::Conflict,
            Self::Service { .. } | Self::Session(_) => ErrorCode::Service,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => *status,
            Self::Unauthorized(_) => Some(401),
            Self::Conflict(_) => Some(409),
            Self::InvalidInput(_) | Self::Session(_) => None,
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(value: ClientError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
