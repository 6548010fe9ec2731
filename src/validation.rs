//! Query-parameter validation for the flashcard list endpoint.
//!
//! This is the schema collaborator: raw untyped query strings go in,
//! a `FlashcardQuery` with defaults applied comes out, and anything
//! out of range is rejected with a 400 before the service layer runs.

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::FlashcardSource;
use crate::pagination::{FlashcardQuery, FlashcardSort, SortOrder, DEFAULT_LIMIT, MAX_LIMIT};

/// Maximum length of the search term, matching the flashcard field limits
pub const MAX_SEARCH_LEN: usize = 200;

/// Raw query parameters as they arrive on the wire, all optional strings
#[derive(Debug, Default, Deserialize)]
pub struct RawFlashcardQuery {
    pub source: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

/// Parses and validates raw query parameters, applying defaults.
///
/// Rules:
/// - `source`: "ai" or "manual", optional
/// - `search`: at most 200 characters, optional
/// - `limit`: integer in [1, 500], default 100
/// - `offset`: integer >= 0, default 0
/// - `sort`: "created_at" or "updated_at", default "created_at"
/// - `order`: "asc" or "desc", default "desc"
pub fn parse_flashcard_query(raw: RawFlashcardQuery) -> AppResult<FlashcardQuery> {
    let source = match raw.source.as_deref() {
        None => None,
        Some(value) => Some(FlashcardSource::parse(value).ok_or_else(|| {
            AppError::Validation(format!(
                "source must be one of 'ai' or 'manual', got '{}'",
                value
            ))
        })?),
    };

    let search = match raw.search {
        None => None,
        Some(value) => {
            if value.chars().count() > MAX_SEARCH_LEN {
                return Err(AppError::Validation(format!(
                    "Search term cannot exceed {} characters",
                    MAX_SEARCH_LEN
                )));
            }
            Some(value)
        }
    };

    let limit = match raw.limit.as_deref() {
        None => DEFAULT_LIMIT,
        Some(value) => {
            let limit: i64 = value
                .parse()
                .map_err(|_| AppError::Validation("limit must be an integer".to_string()))?;
            if limit < 1 {
                return Err(AppError::Validation("Limit must be at least 1".to_string()));
            }
            if limit > MAX_LIMIT {
                return Err(AppError::Validation(format!(
                    "Limit cannot exceed {}",
                    MAX_LIMIT
                )));
            }
            limit
        }
    };

    let offset = match raw.offset.as_deref() {
        None => 0,
        Some(value) => {
            let offset: i64 = value
                .parse()
                .map_err(|_| AppError::Validation("offset must be an integer".to_string()))?;
            if offset < 0 {
                return Err(AppError::Validation(
                    "Offset cannot be negative".to_string(),
                ));
            }
            offset
        }
    };

    let sort = match raw.sort.as_deref() {
        None => FlashcardSort::default(),
        Some(value) => FlashcardSort::parse(value).ok_or_else(|| {
            AppError::Validation(format!(
                "sort must be one of 'created_at' or 'updated_at', got '{}'",
                value
            ))
        })?,
    };

    let order = match raw.order.as_deref() {
        None => SortOrder::default(),
        Some(value) => SortOrder::parse(value).ok_or_else(|| {
            AppError::Validation(format!(
                "order must be one of 'asc' or 'desc', got '{}'",
                value
            ))
        })?,
    };

    Ok(FlashcardQuery {
        source,
        search,
        limit,
        offset,
        sort,
        order,
    })
}
