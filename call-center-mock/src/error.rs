//! Error responses in the backend's `{"detail": ...}` format

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::response::ErrorDetail;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MockError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Injected failure")]
    Injected,
}

impl MockError {
    pub fn status(&self) -> StatusCode {
        match self {
            MockError::NotFound(_) => StatusCode::NOT_FOUND,
            MockError::BadRequest(_) => StatusCode::BAD_REQUEST,
            MockError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MockError::Injected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorDetail::new(self.to_string()))).into_response()
    }
}

pub type MockResult<T> = Result<T, MockError>;
