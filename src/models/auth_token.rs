use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// API token model - a bearer token tied to one user
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AuthToken {
    pub id: i32,
    pub user_id: Uuid,
    pub token: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Request to create a token
#[derive(Debug, Deserialize)]
pub struct CreateAuthToken {
    pub description: Option<String>,
}
