//! Application error envelope.
//!
//! Every handler and service path reports failures through [`AppError`],
//! which pairs an HTTP status with an [`anyhow::Error`] and renders as a
//! single JSON shape: `{"error": "<message>"}`.

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// Missing, expired, or otherwise invalid credential.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!("{}", msg.into()))
    }

    /// Valid identity, disallowed action.
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!("{}", msg.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = %self.error, "Request failed");
        }

        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_map_to_expected_statuses() {
        assert_eq!(
            AppError::unauthorized("no token").status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::forbidden("not yours").status,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::not_found(anyhow!("missing")).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::bad_request(anyhow!("bad")).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::internal(anyhow!("boom")).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn from_impl_defaults_to_internal() {
        let err: AppError = anyhow!("unexpected").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn message_is_preserved() {
        let err = AppError::forbidden("Forbidden access");
        assert_eq!(err.error.to_string(), "Forbidden access");
    }
}
