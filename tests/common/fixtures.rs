//! Test fixtures and data builders
//!
//! Provides reusable test data for users, tokens, flashcards and
//! generation sessions.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use flashgen::models::{CreateAuthToken, CreateUser, Flashcard, User};
use flashgen::services::{AuthTokenService, UsersService};

/// Creates a user
pub async fn create_user(pool: &PgPool, email: &str) -> User {
    UsersService::create(
        pool,
        CreateUser {
            email: email.to_string(),
        },
    )
    .await
    .expect("Failed to create user")
}

/// Creates a bearer token for a user and returns the token string
pub async fn create_token(pool: &PgPool, user_id: Uuid) -> String {
    AuthTokenService::create(
        pool,
        user_id,
        CreateAuthToken {
            description: Some("Test token".to_string()),
        },
    )
    .await
    .expect("Failed to create token")
    .token
}

/// Inserts a flashcard directly, bypassing the service layer
pub async fn seed_flashcard(
    pool: &PgPool,
    user_id: Uuid,
    sentence_en: &str,
    translation_pl: &str,
    source: &str,
) -> Flashcard {
    sqlx::query_as::<_, Flashcard>(
        r#"
        INSERT INTO flashcards (user_id, sentence_en, translation_pl, source)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(sentence_en)
    .bind(translation_pl)
    .bind(source)
    .fetch_one(pool)
    .await
    .expect("Failed to seed flashcard")
}

/// Inserts a flashcard with explicit timestamps, for deterministic ordering
pub async fn seed_flashcard_at(
    pool: &PgPool,
    user_id: Uuid,
    sentence_en: &str,
    translation_pl: &str,
    source: &str,
    created_at: DateTime<Utc>,
) -> Flashcard {
    sqlx::query_as::<_, Flashcard>(
        r#"
        INSERT INTO flashcards (user_id, sentence_en, translation_pl, source, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(sentence_en)
    .bind(translation_pl)
    .bind(source)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .expect("Failed to seed flashcard")
}

/// Inserts a completed generation session with an explicit creation time
pub async fn seed_session(
    pool: &PgPool,
    user_id: Uuid,
    input_sentences_count: i32,
    created_at: DateTime<Utc>,
) {
    sqlx::query(
        r#"
        INSERT INTO generation_sessions
            (user_id, status, input_sentences_count, generated_count, created_at)
        VALUES ($1, 'completed', $2, $2, $3)
        "#,
    )
    .bind(user_id)
    .bind(input_sentences_count)
    .bind(created_at)
    .execute(pool)
    .await
    .expect("Failed to seed generation session");
}
