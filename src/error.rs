use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use std::num::ParseIntError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum AlbumError {
    #[error("invalid request body: {0}")]
    InvalidInput(String),

    #[error("invalid album id {raw:?}: {source}")]
    InvalidId {
        raw: String,
        #[source]
        source: ParseIntError,
    },

    #[error("malformed album id: {0}")]
    MalformedId(String),

    #[error("album {id} not found")]
    NotFound { id: i64 },

    #[error("unable to {op}: {source}")]
    Store {
        op: &'static str,
        #[source]
        source: SqlxError,
    },

    #[error("unable to {op}: deadline exceeded")]
    Timeout { op: &'static str },

    #[error("album id {id} matched more than one row")]
    Consistency { id: i64 },

    #[error("album actor error: {0}")]
    Actor(String),

    #[error("startup error: {0}")]
    Bootstrap(String),
}

impl AlbumError {
    /// Wrap a driver error with the operation that produced it.
    pub fn store(op: &'static str) -> impl FnOnce(SqlxError) -> Self {
        move |source| AlbumError::Store { op, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AlbumError::InvalidInput(_)
            | AlbumError::InvalidId { .. }
            | AlbumError::MalformedId(_) => StatusCode::BAD_REQUEST,
            AlbumError::NotFound { .. } => StatusCode::NOT_FOUND,
            AlbumError::Store { .. }
            | AlbumError::Timeout { .. }
            | AlbumError::Consistency { .. }
            | AlbumError::Actor(_)
            | AlbumError::Bootstrap(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AlbumError::InvalidInput(_) => "Invalid request",
            AlbumError::InvalidId { .. } | AlbumError::MalformedId(_) => "Invalid ID number",
            AlbumError::NotFound { .. } => "Album not found",
            _ => "Internal error",
        }
    }
}

impl IntoResponse for AlbumError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "album request failed");
        }
        let body = ApiErrorResponse {
            message: self.public_message(),
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// JSON error body: a fixed message plus the underlying error text.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub message: &'static str,
    pub error: String,
}
