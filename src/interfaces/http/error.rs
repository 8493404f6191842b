//! Domain error to HTTP status mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::common::ApiResponse;
use crate::domain::{DomainError, ErrorKind};

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// Malformed request outside the body (headers, path)
    BadRequest(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

/// Status code for a domain error.
///
/// Authorization failures answer 404 so callers cannot probe other users'
/// bookings and items.
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::EmailAlreadyExists(_) => StatusCode::CONFLICT,
        _ => match err.kind() {
            ErrorKind::NotFound | ErrorKind::Authorization => StatusCode::NOT_FOUND,
            ErrorKind::Validation | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(e) => {
                let status = status_for(&e);
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    error!(error = %e, "Request failed");
                    (status, "Internal server error".to_string())
                } else {
                    (status, e.to_string())
                }
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}
