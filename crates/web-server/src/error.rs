// In crates/web-server/src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::types::ErrorResponse;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(#[from] risk::Error),

    #[error("Database error: {0}")]
    Database(#[from] database::Error),

    #[error("Invalid allowed origin: {0}")]
    InvalidOrigin(String),

    #[error("Failed to bind server address")]
    ServerBindError(std::io::Error),

    #[error("Server error: {0}")]
    ServeError(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::InvalidInput(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Error::Database(database::Error::NotFound(id)) => {
                (StatusCode::NOT_FOUND, format!("Trade {} not found", id))
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
