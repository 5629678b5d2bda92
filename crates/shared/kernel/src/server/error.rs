use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::borrow::Cow;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned to HTTP clients as `{"error": "<message>"}`.
#[tscope_derive::tscope_error]
pub enum ApiError {
    /// The request is missing a required field or carries an invalid one.
    #[error("{message}")]
    BadRequest { message: Cow<'static, str> },

    /// A body the extractor refused mid-stream (malformed or over the size limit).
    #[error("{message}")]
    Rejected { status: StatusCode, message: Cow<'static, str> },

    #[error("{message}{}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    #[must_use]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Rejected { status, .. } => *status,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Rejected { status: err.status(), message: err.body_text().into() }
    }
}

impl From<super::ApiStateError> for ApiError {
    fn from(err: super::ApiStateError) -> Self {
        Self::Internal { message: err.to_string().into(), context: None }
    }
}
