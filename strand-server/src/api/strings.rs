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

//! String entry routes: create, fetch, filter, search, delete.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use strand_core::{Criteria, StringEntry};
use strand_query::InterpretedQuery;

use crate::api::{ApiError, AppState};

/// Raw filter query parameters.
///
/// Parsed by hand rather than typed so an unparseable number or a
/// multi-character `contains_character` comes back as a 400 validation error
/// with a pointed message instead of a framework rejection.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains_character: Option<String>,
}

/// Filter/search response body.
#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub matches: Vec<StringEntry>,
    pub count: usize,
    pub applied_filters: serde_json::Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreted_query: Option<InterpretedQuery>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// POST /api/v1/strings
pub async fn create_string(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let value = match body.get("value") {
        None | Some(Value::Null) => {
            return Err(ApiError::BadRequest(
                "missing \"value\" in request body".to_string(),
            ))
        }
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(ApiError::Unprocessable(
                "invalid data type for \"value\"; must be a string".to_string(),
            ))
        }
    };

    let entry = state.service.create_string(&value)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/strings/:value
pub async fn get_string_by_value(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> Result<Json<StringEntry>, ApiError> {
    Ok(Json(state.service.get_by_value(&value)?))
}

/// GET /api/v1/strings?is_palindrome=&min_length=&max_length=&word_count=&contains_character=
pub async fn filter_by_criteria(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<FilterResponse>, ApiError> {
    let criteria = parse_filter_params(params)?;
    let outcome = state.service.filter_by_criteria(&criteria)?;
    Ok(Json(FilterResponse {
        count: outcome.matches.len(),
        matches: outcome.matches,
        applied_filters: outcome.applied_filters,
        interpreted_query: None,
    }))
}

/// POST /api/v1/search
pub async fn search_by_natural_language(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<FilterResponse>, ApiError> {
    let outcome = state.service.filter_by_natural_language(&request.query)?;
    Ok(Json(FilterResponse {
        count: outcome.matches.len(),
        matches: outcome.matches,
        applied_filters: outcome.applied_filters,
        interpreted_query: outcome.interpreted_query,
    }))
}

/// DELETE /api/v1/strings/:value
pub async fn delete_string_by_value(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_by_value(&value)?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_filter_params(params: FilterParams) -> Result<Criteria, ApiError> {
    let mut criteria = Criteria::default();

    if let Some(raw) = params.is_palindrome {
        criteria.is_palindrome = Some(raw.parse().map_err(|_| {
            ApiError::BadRequest(format!("invalid boolean for is_palindrome: '{raw}'"))
        })?);
    }
    if let Some(raw) = params.min_length {
        criteria.min_length = Some(parse_count("min_length", &raw)?);
    }
    if let Some(raw) = params.max_length {
        criteria.max_length = Some(parse_count("max_length", &raw)?);
    }
    if let Some(raw) = params.word_count {
        criteria.word_count = Some(parse_count("word_count", &raw)?);
    }
    if let Some(raw) = params.contains_character {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => criteria.contains_character = Some(ch),
            _ => {
                return Err(ApiError::BadRequest(format!(
                    "contains_character must be a single character, got '{raw}'"
                )))
            }
        }
    }

    Ok(criteria)
}

fn parse_count(name: &str, raw: &str) -> Result<u64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid value for {name}: '{raw}'")))
}
