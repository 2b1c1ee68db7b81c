use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::StatusBody;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Fixture not found: {0}")]
    FixtureMissing(String),

    #[error("Simulated upstream failure")]
    SimulatedFailure,

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        ApiError::Session(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, "Forbidden").into_response()
            }
            ApiError::FixtureMissing(path) => {
                tracing::debug!("Fixture not found: {}", path);
                StatusCode::NOT_FOUND.into_response()
            }
            ApiError::SimulatedFailure => {
                tracing::debug!("Simulated upstream failure");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(StatusBody::FAILED)).into_response()
            }
            ApiError::InvalidTransaction(msg) => {
                tracing::warn!("Invalid transaction: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(StatusBody::FAILED)).into_response()
            }
            ApiError::Session(msg) => {
                tracing::error!("Session error: {}", msg);
                internal("SessionError", msg)
            }
            ApiError::Io(err) => {
                tracing::error!("I/O error: {}", err);
                internal("IoError", err.to_string())
            }
        }
    }
}

fn internal(error_type: &str, message: String) -> Response {
    let body = Json(ErrorResponse {
        error: error_type.to_string(),
        message,
    });

    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
