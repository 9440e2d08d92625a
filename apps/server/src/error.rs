//! Error types for the catalog API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use marquee_query::QueryError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl Error {
    /// The "nothing matched" error for a list or detail endpoint, e.g. `films not found`.
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{entity} not found"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::Query(QueryError::Backend(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Query(e) if e.is_client_error() => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Query(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Error::Query(QueryError::InvalidCursor(reason)) => {
                tracing::debug!(reason = %reason, "Rejected page[next] token");
                "page[next] not valid".to_string()
            }
            Error::Query(QueryError::Backend(e)) => {
                tracing::error!(error = %e, "Search backend failure");
                "search backend unavailable".to_string()
            }
            Error::Query(QueryError::ConflictingPagination) | Error::Internal(_) => {
                tracing::error!("Internal error: {}", self);
                "Internal server error".to_string()
            }
            Error::Query(e) => e.to_string(),
            Error::Validation(msg) | Error::NotFound(msg) => msg.clone(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
