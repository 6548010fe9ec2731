use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::generate_token;
use crate::error::AppResult;
use crate::models::{AuthToken, CreateAuthToken};

pub struct AuthTokenService;

impl AuthTokenService {
    /// Gets a token by token string (for authentication)
    pub async fn get_by_token(pool: &PgPool, token: &str) -> AppResult<Option<AuthToken>> {
        let result = sqlx::query_as::<_, AuthToken>(
            r#"
            SELECT id, user_id, token, description, created_at, last_used_at
            FROM auth_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(result)
    }

    /// Creates a new token for a user
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        input: CreateAuthToken,
    ) -> AppResult<AuthToken> {
        let token_str = generate_token();

        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (user_id, token, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token, description, created_at, last_used_at
            "#,
        )
        .bind(user_id)
        .bind(&token_str)
        .bind(&input.description)
        .fetch_one(pool)
        .await?;

        Ok(token)
    }

    /// Updates last_used_at timestamp
    pub async fn update_last_used(pool: &PgPool, id: i32) -> AppResult<()> {
        sqlx::query("UPDATE auth_tokens SET last_used_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Checks if any tokens exist (for bootstrap check)
    pub async fn has_any_token(pool: &PgPool) -> AppResult<bool> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM auth_tokens")
            .fetch_one(pool)
            .await?;

        Ok(count.0 > 0)
    }
}
