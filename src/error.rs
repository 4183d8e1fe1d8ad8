//! Error taxonomy for board operations and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::utils::http_helpers::HTTPError;

/// Every failure a board request can end with. All of them are terminal for
/// the request.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BoardError {
    pub fn status(&self) -> StatusCode {
        match self {
            BoardError::Unauthenticated => StatusCode::UNAUTHORIZED,
            BoardError::InvalidToken(_)
            | BoardError::BadRequest(_)
            | BoardError::Validation(_) => StatusCode::BAD_REQUEST,
            BoardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BoardError> for HTTPError {
    fn from(err: BoardError) -> Self {
        let status = err.status();
        match err {
            BoardError::Internal(detail) => {
                // Details stay in the log.
                error!(error = %detail, "Internal server error");
                HTTPError::new(status, "Internal server error")
            }
            BoardError::InvalidToken(_) => HTTPError::new(status, "Invalid token"),
            other => HTTPError::new(status, other.to_string()),
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        HTTPError::from(self).into_response()
    }
}
