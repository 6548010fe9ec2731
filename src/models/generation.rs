use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::flashcard::{FlashcardResponse, MAX_FIELD_LEN};

/// Lifecycle of a generation session, matches the database CHECK constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Processing,
    Completed,
    Partial,
    Failed,
}

impl GenerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Pending => "pending",
            GenerationStatus::Processing => "processing",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Partial => "partial",
            GenerationStatus::Failed => "failed",
        }
    }
}

/// Generation session model - one AI generation request by one user.
///
/// Rows are the unit of daily quota accounting: the limit check sums
/// `input_sentences_count` over the owner's sessions created today (UTC).
/// Sessions are never deleted or backdated once created.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GenerationSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: GenerationStatus,
    pub input_sentences_count: i32,
    pub generated_count: i32,
    pub failed_count: i32,
    pub duration_ms: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for POST /api/generate
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub sentences: Vec<String>,
}

impl GenerateRequest {
    /// Validates sentence count and individual sentence shape.
    /// `max_sentences` comes from GenerationConfig.
    pub fn validate(&self, max_sentences: usize) -> AppResult<()> {
        if self.sentences.is_empty() {
            return Err(AppError::Validation(
                "sentences cannot be empty".to_string(),
            ));
        }
        if self.sentences.len() > max_sentences {
            return Err(AppError::Validation(format!(
                "cannot generate more than {} sentences per request",
                max_sentences
            )));
        }
        for (i, sentence) in self.sentences.iter().enumerate() {
            if sentence.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "sentence at index {} is empty",
                    i
                )));
            }
            if sentence.chars().count() > MAX_FIELD_LEN {
                return Err(AppError::Validation(format!(
                    "sentence at index {} exceeds {} characters",
                    i, MAX_FIELD_LEN
                )));
            }
        }
        Ok(())
    }
}

/// Response payload for POST /api/generate
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub session_id: Uuid,
    pub status: GenerationStatus,
    pub flashcards: Vec<FlashcardResponse>,
    pub generated_count: i32,
    pub failed_count: i32,
    pub duration_ms: Option<i64>,
}
