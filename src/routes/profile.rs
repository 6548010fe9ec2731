use actix_web::{web, HttpResponse};

use crate::auth::AuthenticatedUser;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::services::UsersService;

/// GET /api/profile
/// Returns the authenticated user's profile
pub async fn get_profile(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let profile = UsersService::get_by_id(pool.get_ref(), user.user_id).await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/profile").route("", web::get().to(get_profile)));
}
