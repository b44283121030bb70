use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use waitdash_app::{ApiError, AppError};

/// A JSON-bodied error response. The payload is the service layer's
/// `ApiError`; the HTTP status always mirrors `body.status`.
#[derive(Debug)]
pub struct HttpError(ApiError);

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>, code: Option<&str>) -> Self {
        Self(ApiError {
            status: status.as_u16(),
            message: message.into(),
            code: code.map(str::to_string),
        })
    }

    pub fn unauthorized(message: &str, code: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message, Some(code))
    }

    pub fn forbidden(message: &str, code: &str) -> Self {
        Self::new(StatusCode::FORBIDDEN, message, Some(code))
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not found", Some("not_found"))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, None)
    }
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        Self(ApiError::from(err))
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}
