use reqwest::StatusCode;
use thiserror::Error;

use shared_models::error::AppError;

/// Failure talking to the clinic backend, classified at the transport boundary
/// so callers never have to inspect message text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Connection refused, timeout, DNS failure or a body that could not be read.
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Backend returned {status}: {message}")]
    Http { status: u16, message: String },

    /// 2xx response whose payload reports a failure.
    #[error("Backend rejected the request: {0}")]
    Application(String),

    #[error("Unexpected backend response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ServiceError {
    pub fn is_network(&self) -> bool {
        matches!(self, ServiceError::Transport(_))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::Decode(e.to_string())
        } else if e.is_builder() {
            ServiceError::InvalidRequest(e.to_string())
        } else {
            ServiceError::Transport(e.to_string())
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Http { status: 401, message } => AppError::Auth(message),
            ServiceError::Http { status: 403, message } => AppError::Forbidden(message),
            ServiceError::Http { status: 404, message } => AppError::NotFound(message),
            ServiceError::Http { status: 400 | 422, message } => AppError::BadRequest(message),
            ServiceError::Application(message) => AppError::BadRequest(message),
            ServiceError::InvalidRequest(message) => AppError::BadRequest(message),
            other => AppError::ExternalService(other.to_string()),
        }
    }
}
