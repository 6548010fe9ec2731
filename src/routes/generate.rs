use actix_web::{web, HttpResponse};

use crate::auth::AuthenticatedUser;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::GenerateRequest;
use crate::services::translator::Translator;
use crate::services::{GenerationLimitService, GenerationService};

/// POST /api/generate
/// Generates AI flashcards from a batch of English sentences.
///
/// The daily limit check runs after validation and before any work:
/// a request that would push the user past the limit is rejected with
/// 429 without recording a session.
pub async fn generate(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    translator: web::Data<dyn Translator>,
    body: web::Json<GenerateRequest>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    request.validate(config.generation.max_sentences_per_request)?;

    let check = GenerationLimitService::check_daily_limit(
        pool.get_ref(),
        user.user_id,
        request.sentences.len() as i64,
        config.generation.daily_limit,
    )
    .await?;

    if check.limit_exceeded {
        return Err(AppError::LimitExceeded(check.message()));
    }

    let response = GenerationService::generate(
        pool.get_ref(),
        translator.get_ref(),
        user.user_id,
        &request.sentences,
    )
    .await?;

    Ok(HttpResponse::Created().json(response))
}

/// Configure generation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/generate").route("", web::post().to(generate)));
}
