use sqlx::PgPool;
use std::time::Instant;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Flashcard, GenerateResponse, GenerationSession, GenerationStatus};
use crate::services::translator::Translator;

pub struct GenerationService;

impl GenerationService {
    /// Runs one generation request: records the session, translates each
    /// sentence, stores the resulting flashcards and finalizes the session.
    ///
    /// The session row is inserted before any translation happens, so its
    /// `input_sentences_count` is visible to subsequent quota checks even
    /// while this request is still running. Individual translation failures
    /// skip the sentence and are reflected in `failed_count`; only store
    /// failures abort the request.
    ///
    /// The caller is responsible for the daily limit check.
    pub async fn generate(
        pool: &PgPool,
        translator: &dyn Translator,
        user_id: Uuid,
        sentences: &[String],
    ) -> AppResult<GenerateResponse> {
        let started = Instant::now();

        let session = sqlx::query_as::<_, GenerationSession>(
            r#"
            INSERT INTO generation_sessions (user_id, status, input_sentences_count)
            VALUES ($1, 'processing', $2)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(sentences.len() as i32)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::store("failed to record generation session", e))?;

        let mut flashcards: Vec<Flashcard> = Vec::with_capacity(sentences.len());
        let mut failed_count = 0i32;

        for sentence in sentences {
            match translator.translate(sentence).await {
                Ok(translation) => {
                    let flashcard = sqlx::query_as::<_, Flashcard>(
                        r#"
                        INSERT INTO flashcards (user_id, sentence_en, translation_pl, source)
                        VALUES ($1, $2, $3, 'ai')
                        RETURNING *
                        "#,
                    )
                    .bind(user_id)
                    .bind(sentence)
                    .bind(&translation)
                    .fetch_one(pool)
                    .await
                    .map_err(|e| AppError::store("failed to store generated flashcard", e))?;

                    flashcards.push(flashcard);
                }
                Err(e) => {
                    log::warn!("Translation failed in session {}: {}", session.id, e);
                    failed_count += 1;
                }
            }
        }

        let generated_count = flashcards.len() as i32;
        let status = if generated_count == 0 {
            GenerationStatus::Failed
        } else if failed_count > 0 {
            GenerationStatus::Partial
        } else {
            GenerationStatus::Completed
        };
        let duration_ms = started.elapsed().as_millis() as i64;

        sqlx::query(
            r#"
            UPDATE generation_sessions
            SET status = $2, generated_count = $3, failed_count = $4, duration_ms = $5
            WHERE id = $1
            "#,
        )
        .bind(session.id)
        .bind(status)
        .bind(generated_count)
        .bind(failed_count)
        .bind(duration_ms)
        .execute(pool)
        .await
        .map_err(|e| AppError::store("failed to finalize generation session", e))?;

        Ok(GenerateResponse {
            session_id: session.id,
            status,
            flashcards: flashcards.into_iter().map(Flashcard::into_response).collect(),
            generated_count,
            failed_count,
            duration_ms: Some(duration_ms),
        })
    }
}
