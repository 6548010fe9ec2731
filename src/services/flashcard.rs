use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CreateFlashcard, Flashcard, UpdateFlashcard};
use crate::pagination::{FlashcardListResponse, FlashcardQuery};

pub struct FlashcardService;

/// Escapes ILIKE pattern metacharacters so user input matches literally.
///
/// Characters escaped: `\`, `%`, `_` (backslash first, so the escapes
/// themselves are not re-escaped).
pub fn escape_like_pattern(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Page row carrying the window-function total alongside the flashcard
#[derive(sqlx::FromRow)]
struct FlashcardPageRow {
    #[sqlx(flatten)]
    flashcard: Flashcard,
    total_count: i64,
}

/// Appends the WHERE stages shared by the page and count queries:
/// owner scope first, then the optional source and search predicates.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, user_id: Uuid, query: &FlashcardQuery) {
    builder.push(" WHERE user_id = ").push_bind(user_id);

    if let Some(source) = query.source {
        builder.push(" AND source = ").push_bind(source);
    }

    if let Some(ref search) = query.search {
        let pattern = format!("%{}%", escape_like_pattern(search));
        builder
            .push(" AND (sentence_en ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR translation_pl ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl FlashcardService {
    /// Lists flashcards for a user with filtering, search, sorting and
    /// offset pagination.
    ///
    /// The total count of matching rows is computed via `COUNT(*) OVER ()`
    /// in the same round-trip as the page, so page and total are consistent
    /// at a single point in time.
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        query: &FlashcardQuery,
    ) -> AppResult<FlashcardListResponse> {
        let mut builder = QueryBuilder::new(
            "SELECT id, user_id, sentence_en, translation_pl, source, is_edited, \
             created_at, updated_at, COUNT(*) OVER () AS total_count FROM flashcards",
        );
        push_filters(&mut builder, user_id, query);

        // Sort column and direction come from enums, never from raw input.
        // The id tiebreak keeps pagination stable across equal timestamps.
        builder.push(format!(
            " ORDER BY {} {}, id {}",
            query.sort.as_str(),
            query.order.sql(),
            query.order.sql()
        ));
        builder
            .push(" LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        let rows: Vec<FlashcardPageRow> = builder
            .build_query_as()
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::store("failed to fetch flashcards", e))?;

        let total = match rows.first() {
            Some(row) => row.total_count,
            // An offset past the last match returns an empty page with no
            // window total; recount with the same filter stages.
            None if query.offset > 0 => Self::count_matching(pool, user_id, query).await?,
            None => 0,
        };

        let data = rows
            .into_iter()
            .map(|row| row.flashcard.into_response())
            .collect();

        Ok(FlashcardListResponse::new(
            data,
            total,
            query.limit,
            query.offset,
        ))
    }

    /// Counts all rows matching the query's filters, ignoring pagination
    async fn count_matching(
        pool: &PgPool,
        user_id: Uuid,
        query: &FlashcardQuery,
    ) -> AppResult<i64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM flashcards");
        push_filters(&mut builder, user_id, query);

        let (count,): (i64,) = builder
            .build_query_as()
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::store("failed to fetch flashcards", e))?;

        Ok(count)
    }

    /// Gets a flashcard by ID, scoped to its owner
    pub async fn get_by_id(pool: &PgPool, user_id: Uuid, id: Uuid) -> AppResult<Flashcard> {
        let flashcard = sqlx::query_as::<_, Flashcard>(
            "SELECT * FROM flashcards WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Flashcard {} not found", id)))?;

        Ok(flashcard)
    }

    /// Creates a manual flashcard
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        input: CreateFlashcard,
    ) -> AppResult<Flashcard> {
        let flashcard = sqlx::query_as::<_, Flashcard>(
            r#"
            INSERT INTO flashcards (user_id, sentence_en, translation_pl, source)
            VALUES ($1, $2, $3, 'manual')
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&input.sentence_en)
        .bind(&input.translation_pl)
        .fetch_one(pool)
        .await?;

        Ok(flashcard)
    }

    /// Updates a flashcard's text fields, marking it as edited
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        input: UpdateFlashcard,
    ) -> AppResult<Flashcard> {
        let flashcard = sqlx::query_as::<_, Flashcard>(
            r#"
            UPDATE flashcards
            SET sentence_en = $3,
                translation_pl = $4,
                is_edited = TRUE,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&input.sentence_en)
        .bind(&input.translation_pl)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Flashcard {} not found", id)))?;

        Ok(flashcard)
    }

    /// Deletes a flashcard
    pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM flashcards WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Flashcard {} not found", id)));
        }

        Ok(())
    }
}
