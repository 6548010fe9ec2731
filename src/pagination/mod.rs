use serde::{Deserialize, Serialize};

use crate::models::{FlashcardResponse, FlashcardSource};

/// Default page size for flashcard listing
pub const DEFAULT_LIMIT: i64 = 100;

/// Maximum page size accepted by the API
pub const MAX_LIMIT: i64 = 500;

/// Pagination metadata for list responses.
///
/// `total` counts all matching rows regardless of the pagination window,
/// so clients can render page controls even when `data.len() < total`.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Paginated flashcard list response
#[derive(Debug, Serialize)]
pub struct FlashcardListResponse {
    pub data: Vec<FlashcardResponse>,
    pub meta: PaginationMeta,
}

impl FlashcardListResponse {
    pub fn new(data: Vec<FlashcardResponse>, total: i64, limit: i64, offset: i64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                total,
                limit,
                offset,
            },
        }
    }
}

/// Sort field for flashcard listing
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlashcardSort {
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl FlashcardSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashcardSort::CreatedAt => "created_at",
            FlashcardSort::UpdatedAt => "updated_at",
        }
    }

    /// Parses the wire form ("created_at" / "updated_at")
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created_at" => Some(FlashcardSort::CreatedAt),
            "updated_at" => Some(FlashcardSort::UpdatedAt),
            _ => None,
        }
    }
}

impl std::fmt::Display for FlashcardSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort order direction
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Parses the wire form ("asc" / "desc")
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    /// SQL keyword for ORDER BY
    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated query parameters for GET /api/flashcards.
///
/// Always produced by `validation::parse_flashcard_query`; the service layer
/// assumes the bounds documented there already hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardQuery {
    pub source: Option<FlashcardSource>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
    pub sort: FlashcardSort,
    pub order: SortOrder,
}

impl Default for FlashcardQuery {
    fn default() -> Self {
        Self {
            source: None,
            search: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort: FlashcardSort::default(),
            order: SortOrder::default(),
        }
    }
}
