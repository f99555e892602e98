//! # REST API Interface Layer
//!
//! HTTP endpoints for the chore tracker, mounted under `/api`.
//!
//! Each `*_apis` module exposes a `router()`; handlers log the request, call
//! one domain service, and map the outcome with the `mappers`. Domain errors
//! become `{"error": ..., "code": ...}` bodies:
//!
//! - NotFound: 404 `NOT_FOUND`
//! - InvalidInput: 400 `INVALID_INPUT`
//! - Storage: 500 `STORAGE_FAILURE`

pub mod admin_apis;
pub mod chore_apis;
pub mod completion_apis;
pub mod extra_task_apis;
pub mod kid_apis;
pub mod mappers;
pub mod progress_apis;
pub mod setting_apis;

use axum::{http::StatusCode, response::Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{error, warn};

use crate::domain::models::error::DomainError;
use crate::AppState;
use shared::ErrorResponse;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub type ApiResult<T> = Result<T, ApiError>;

/// Every API route, relative to `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(kid_apis::router())
        .merge(progress_apis::router())
        .merge(completion_apis::router())
        .merge(chore_apis::router())
        .merge(extra_task_apis::router())
        .merge(setting_apis::router())
        .merge(admin_apis::router())
}

/// Translate a domain error into a status code and JSON body
pub fn error_response(err: DomainError) -> ApiError {
    let (status, code, message) = match &err {
        DomainError::NotFound { .. } => {
            warn!("{}", err);
            (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        DomainError::InvalidInput(message) => {
            warn!("Invalid input: {}", message);
            (StatusCode::BAD_REQUEST, "INVALID_INPUT", message.clone())
        }
        DomainError::Storage(source) => {
            error!("Storage failure: {:#}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_FAILURE",
                "Internal storage error".to_string(),
            )
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        }),
    )
}

pub fn invalid_input(message: impl Into<String>) -> ApiError {
    error_response(DomainError::invalid(message))
}

/// `?date=YYYY-MM-DD`, defaulting to today
#[derive(Debug, Deserialize, Default)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

impl DateQuery {
    pub fn date_or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(today)
    }
}

/// The current UTC calendar day
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let (status, Json(body)) = error_response(DomainError::not_found("Kid", 7));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.error, "Kid not found: 7");

        let (status, Json(body)) = error_response(DomainError::invalid("bad"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_INPUT");

        let (status, Json(body)) = error_response(anyhow::anyhow!("disk I/O error").into());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "STORAGE_FAILURE");
        assert!(!body.error.contains("disk"));
    }
}
