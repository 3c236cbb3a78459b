// Copyright 2025 Strand Contributors (https://github.com/strandhq/strand)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! HTTP API surface: error mapping, shared state, and route handlers.

pub mod health;
pub mod strings;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use strand_core::StrandError;

use crate::service::StringService;

pub use health::health_check;
pub use strings::{
    create_string, delete_string_by_value, filter_by_criteria, get_string_by_value,
    search_by_natural_language,
};

/// API-level error with a one-to-one HTTP status mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<StrandError> for ApiError {
    fn from(err: StrandError) -> Self {
        match err {
            StrandError::Validation(msg) => ApiError::BadRequest(msg),
            StrandError::Parse(msg) => ApiError::BadRequest(msg),
            StrandError::ConflictingFilters(msg) => ApiError::Unprocessable(msg),
            StrandError::Conflict(msg) => ApiError::Conflict(msg),
            StrandError::NotFound(msg) => ApiError::NotFound(msg),
            StrandError::Internal(msg) => {
                // log the cause, hand the client a generic failure
                error!("internal error: {msg}");
                ApiError::Internal("internal server error".to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StringService>,
}
