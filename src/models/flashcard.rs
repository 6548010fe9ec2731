use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Maximum length of each flashcard text field
pub const MAX_FIELD_LEN: usize = 200;

/// How a flashcard came to exist, matches the database CHECK constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum FlashcardSource {
    Ai,
    Manual,
}

impl FlashcardSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashcardSource::Ai => "ai",
            FlashcardSource::Manual => "manual",
        }
    }

    /// Parses the lowercase wire form ("ai" / "manual")
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ai" => Some(FlashcardSource::Ai),
            "manual" => Some(FlashcardSource::Manual),
            _ => None,
        }
    }
}

impl std::fmt::Display for FlashcardSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flashcard model - a single EN/PL sentence pair owned by one user
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Flashcard {
    pub id: Uuid,
    pub user_id: Uuid,
    pub sentence_en: String,
    pub translation_pl: String,
    pub source: FlashcardSource,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response for API - identical to the row minus the owner id,
/// which is never exposed over the wire
#[derive(Debug, Serialize)]
pub struct FlashcardResponse {
    pub id: Uuid,
    pub sentence_en: String,
    pub translation_pl: String,
    pub source: FlashcardSource,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    /// Converts to API response format, stripping the owner id
    pub fn into_response(self) -> FlashcardResponse {
        FlashcardResponse {
            id: self.id,
            sentence_en: self.sentence_en,
            translation_pl: self.translation_pl,
            source: self.source,
            is_edited: self.is_edited,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Request to create a manual flashcard
#[derive(Debug, Deserialize)]
pub struct CreateFlashcard {
    pub sentence_en: String,
    pub translation_pl: String,
}

/// Request to update a flashcard's text fields
#[derive(Debug, Deserialize)]
pub struct UpdateFlashcard {
    pub sentence_en: String,
    pub translation_pl: String,
}

fn validate_field(name: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} cannot be empty", name)));
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(AppError::Validation(format!(
            "{} cannot exceed {} characters",
            name, MAX_FIELD_LEN
        )));
    }
    Ok(())
}

impl CreateFlashcard {
    pub fn validate(&self) -> AppResult<()> {
        validate_field("sentence_en", &self.sentence_en)?;
        validate_field("translation_pl", &self.translation_pl)?;
        Ok(())
    }
}

impl UpdateFlashcard {
    pub fn validate(&self) -> AppResult<()> {
        validate_field("sentence_en", &self.sentence_en)?;
        validate_field("translation_pl", &self.translation_pl)?;
        Ok(())
    }
}
