// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::message::ErrorResponse;
use crate::services::{completion::CompletionError, lookup::LookupError};

pub const GENERIC_ERROR: &str = "There was an error processing your request.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidBody(rejection) => {
                warn!(error = %rejection, "rejected chat request body");
                let body = ErrorResponse { error: rejection.body_text() };
                return (rejection.status(), Json(body)).into_response();
            }
            // Upstream details stay in the log; callers only see the generic message.
            AppError::Lookup(e) => error!(error = %e, "document store lookup failed"),
            AppError::Completion(e) => error!(error = %e, "completion call failed"),
        }
        let body = ErrorResponse { error: GENERIC_ERROR.to_string() };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
