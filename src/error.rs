use argon2::password_hash;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::db::StoreError;
use crate::users::password::PolicyError;

/// Failures reported to callers of the user service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error("unable to parse uuid: {0}")]
    InvalidIdentifier(#[from] uuid::Error),
    #[error("malformed request body: {0}")]
    MalformedRequest(#[from] JsonRejection),
    #[error("unable to generate hash for password: {0}")]
    Hashing(#[source] password_hash::Error),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("user store is unavailable")]
    Unavailable,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Policy(_)
            | ServiceError::InvalidIdentifier(_)
            | ServiceError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Hashing(_) | ServiceError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self.status() {
            StatusCode::BAD_REQUEST => "invalid_argument",
            StatusCode::SERVICE_UNAVAILABLE => "unavailable",
            _ => "internal",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<ServiceError> for tonic::Status {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err.status() {
            StatusCode::BAD_REQUEST => tonic::Status::invalid_argument(message),
            StatusCode::SERVICE_UNAVAILABLE => tonic::Status::unavailable(message),
            _ => tonic::Status::internal(message),
        }
    }
}
