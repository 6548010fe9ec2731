use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub struct GenerationLimitService;

/// Result of checking the daily generation limit
#[derive(Debug, Clone, Serialize)]
pub struct DailyLimitCheck {
    /// Whether granting the requested count would exceed the limit
    pub limit_exceeded: bool,
    /// Sentences already generated today
    pub used_today: i64,
    /// Daily limit (sentences per day)
    pub limit: i64,
    /// Sentences remaining today, never negative
    pub remaining: i64,
    /// Sentences the caller wants to generate
    pub requested_count: i64,
}

impl DailyLimitCheck {
    /// Pure quota arithmetic over today's usage.
    ///
    /// A request exceeds when usage plus the requested amount would end up
    /// strictly past the limit. Exactly reaching the limit is allowed.
    pub fn evaluate(used_today: i64, requested_count: i64, limit: i64) -> Self {
        Self {
            limit_exceeded: used_today + requested_count > limit,
            used_today,
            limit,
            remaining: (limit - used_today).max(0),
            requested_count,
        }
    }

    /// User-facing message for the 429 response
    pub fn message(&self) -> String {
        format!(
            "Daily limit exceeded. You have used {}/{} sentences today. \
             You can generate {} more sentences today.",
            self.used_today, self.limit, self.remaining
        )
    }
}

/// Half-open UTC day window `[start_of_today, start_of_tomorrow)` containing
/// `now`. The boundary is always UTC midnight, independent of caller locale.
pub fn utc_day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start_of_today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    (start_of_today, start_of_today + Duration::days(1))
}

impl GenerationLimitService {
    /// Checks whether generating `requested_count` more sentences would push
    /// the user past the daily limit.
    ///
    /// Sums `input_sentences_count` over the user's generation sessions
    /// created today (UTC); an empty set sums to zero. Read-only and not
    /// atomic against concurrent generates: two simultaneous checks can both
    /// pass. The quota is advisory, not a hard allocation guarantee.
    pub async fn check_daily_limit(
        pool: &PgPool,
        user_id: Uuid,
        requested_count: i64,
        limit: i64,
    ) -> AppResult<DailyLimitCheck> {
        let (start_of_today, start_of_tomorrow) = utc_day_bounds(Utc::now());

        let used_today: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(input_sentences_count), 0)::BIGINT
            FROM generation_sessions
            WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
            "#,
        )
        .bind(user_id)
        .bind(start_of_today)
        .bind(start_of_tomorrow)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::store("failed to check daily generation limit", e))?;

        Ok(DailyLimitCheck::evaluate(used_today, requested_count, limit))
    }
}
