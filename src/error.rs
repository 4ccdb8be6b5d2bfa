use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Handler failure mapped to an HTTP status and a plain-text body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A parameter was present but could not be parsed.
    #[error("{0}")]
    BadRequest(String),

    /// A statement failed, or no connection could be obtained from the pool.
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::BadRequest(message) => (status, message).into_response(),
            ApiError::Database(e) => {
                error!("Database error: {:#}", e);
                (status, "Internal Server Error").into_response()
            }
        }
    }
}
