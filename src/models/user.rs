use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User model - the owner identity all flashcards and generation
/// sessions are scoped to
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Request to create a user
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
}
