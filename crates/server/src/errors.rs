use std::marker::PhantomData;

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use common::types::ErrorBody;
use service::errors::ServiceError;

const INTERNAL: &str = "Error interno del servidor";

/// How an error message is written into the response body.
pub trait ErrorStyle {
    fn render(status: StatusCode, message: String) -> Response;
}

/// Body is the bare message (users, animals, catalog, forms).
#[derive(Debug)]
pub struct Plain;

/// Body is `{"error": message}` (cart, orders).
#[derive(Debug)]
pub struct Wrapped;

impl ErrorStyle for Plain {
    fn render(status: StatusCode, message: String) -> Response {
        (status, message).into_response()
    }
}

impl ErrorStyle for Wrapped {
    fn render(status: StatusCode, message: String) -> Response {
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[derive(Debug)]
pub struct ApiError<S: ErrorStyle = Plain> {
    pub status: StatusCode,
    pub message: String,
    style: PhantomData<S>,
}

impl<S: ErrorStyle> ApiError<S> {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), style: PhantomData }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl<S: ErrorStyle> From<ServiceError> for ApiError<S> {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) | ServiceError::Rejected(m) => Self::new(StatusCode::BAD_REQUEST, m),
            ServiceError::Forbidden(m) => Self::new(StatusCode::FORBIDDEN, m),
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, m),
            ServiceError::Unauthorized(m) => Self::new(StatusCode::UNAUTHORIZED, m),
            ServiceError::Db(detail) => {
                error!(error = %detail, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL)
            }
        }
    }
}

impl<S: ErrorStyle> From<JsonRejection> for ApiError<S> {
    fn from(r: JsonRejection) -> Self {
        Self::bad_request(r.body_text())
    }
}

impl<S: ErrorStyle> From<MultipartError> for ApiError<S> {
    fn from(e: MultipartError) -> Self {
        Self::bad_request(e.body_text())
    }
}

impl<S: ErrorStyle> IntoResponse for ApiError<S> {
    fn into_response(self) -> Response {
        S::render(self.status, self.message)
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("peer client: {0}")]
    Peer(#[from] common::CommonError),
    #[error("migration: {0}")]
    Migration(#[from] sea_orm::DbErr),
    #[error("seed data: {0}")]
    Seed(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
