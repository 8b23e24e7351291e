//! Typed errors, HTTP mapping and GraphQL error extensions.

use crate::repository::RepoError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("{kind} {id} referenced by book {book_id} does not exist")]
    MissingRelation {
        kind: &'static str,
        id: i64,
        book_id: i64,
    },
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    /// Stable machine-readable code, also exposed as `extensions.code` in GraphQL errors.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::InvalidId(_) => "INVALID_ID",
            AppError::MissingRelation { .. } => "MISSING_RELATION",
            AppError::Repo(_) => "STORAGE_ERROR",
            AppError::Db(_) => "DATABASE_ERROR",
        }
    }
}

impl async_graphql::ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::Repo(_) | AppError::Db(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_) | AppError::MissingRelation { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::ErrorExtensions;

    #[test]
    fn invalid_id_maps_to_bad_request() {
        let response = AppError::InvalidId("abc".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failure_maps_to_unavailable() {
        let response = AppError::Repo(RepoError::Poisoned).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn graphql_error_carries_code_extension() {
        let err = AppError::InvalidId("x1".into()).extend();
        assert_eq!(err.message, "Invalid id: x1");
        let extensions = err.extensions.expect("extensions set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::String("INVALID_ID".into()))
        );
    }
}
