use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{CreateFlashcard, UpdateFlashcard};
use crate::services::FlashcardService;
use crate::validation::{parse_flashcard_query, RawFlashcardQuery};

/// GET /api/flashcards
/// Lists the user's flashcards with filtering, search and pagination
pub async fn list_flashcards(
    pool: web::Data<DbPool>,
    raw_query: web::Query<RawFlashcardQuery>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    // Schema validation runs before the query builder; malformed
    // parameters never reach the service layer
    let query = parse_flashcard_query(raw_query.into_inner())?;

    let response = FlashcardService::list(pool.get_ref(), user.user_id, &query).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/flashcards/{id}
/// Gets a single flashcard by ID
pub async fn get_flashcard(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let flashcard = FlashcardService::get_by_id(pool.get_ref(), user.user_id, id).await?;

    Ok(HttpResponse::Ok().json(flashcard.into_response()))
}

/// POST /api/flashcards
/// Creates a manual flashcard
pub async fn create_flashcard(
    pool: web::Data<DbPool>,
    body: web::Json<CreateFlashcard>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let flashcard = FlashcardService::create(pool.get_ref(), user.user_id, input).await?;

    Ok(HttpResponse::Created().json(flashcard.into_response()))
}

/// PUT /api/flashcards/{id}
/// Updates a flashcard's text fields and marks it as edited
pub async fn update_flashcard(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateFlashcard>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let flashcard = FlashcardService::update(pool.get_ref(), user.user_id, id, input).await?;

    Ok(HttpResponse::Ok().json(flashcard.into_response()))
}

/// DELETE /api/flashcards/{id}
/// Deletes a flashcard
pub async fn delete_flashcard(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    FlashcardService::delete(pool.get_ref(), user.user_id, id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure flashcard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/flashcards")
            .route("", web::get().to(list_flashcards))
            .route("", web::post().to(create_flashcard))
            .route("/{id}", web::get().to(get_flashcard))
            .route("/{id}", web::put().to(update_flashcard))
            .route("/{id}", web::delete().to(delete_flashcard)),
    );
}
