//! HTTP error mapping

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use usuarios_core::DomainError;

use crate::response::ErrorBody;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Duplicate identifier; reported as 400 like other input problems.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Maps a domain error; `context` is the message sent to the client when
    /// the failure is internal, so storage details never leave the process.
    pub fn from_domain(err: DomainError, context: &str) -> Self {
        let message = err.to_string();
        match err {
            DomainError::MissingFields(_)
            | DomainError::InvalidName
            | DomainError::InvalidPhone
            | DomainError::InvalidEmail
            | DomainError::InvalidStatus
            | DomainError::EmptyUpdate => ApiError::BadRequest(message),
            DomainError::IdentifierAlreadyExists(_) => ApiError::Conflict(message),
            DomainError::UnknownIdentifier(_) | DomainError::InvalidCredentials => {
                ApiError::Unauthorized(message)
            }
            DomainError::UserNotActive => ApiError::Forbidden(message),
            DomainError::UserNotFound => ApiError::NotFound(message),
            DomainError::OperationDisabled(_) => ApiError::MethodNotAllowed(message),
            DomainError::PasswordHashError(_) | DomainError::DatabaseError(_) => {
                tracing::error!("{}: {}", context, message);
                ApiError::InternalError(context.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("JSON inválido: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!("Parâmetro inválido: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::Conflict(msg) => {
                tracing::warn!("Bad request: {}", msg);
                msg
            }
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                msg
            }
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                msg
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                msg
            }
            ApiError::MethodNotAllowed(msg) => {
                tracing::warn!("Method not allowed: {}", msg);
                msg
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                msg
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
