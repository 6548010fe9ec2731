use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

use crate::auth::token::is_valid_token_format;
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::AuthToken;
use crate::services::AuthTokenService;

/// Extractor for Bearer token authentication.
///
/// Every owner-scoped endpoint takes this extractor; the resolved
/// `user_id` is the only identity the service layer ever sees.
///
/// Usage in handlers:
/// ```ignore
/// async fn my_handler(user: AuthenticatedUser) -> HttpResponse {
///     // user.user_id identifies the owner
/// }
/// ```
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    #[allow(dead_code)] // Available for handlers that need token details
    pub token: AuthToken,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let pool = match req.app_data::<web::Data<DbPool>>().cloned() {
            Some(pool) => pool,
            None => {
                return Box::pin(async {
                    Err(AppError::Internal(
                        "Database pool not configured".to_string(),
                    ))
                });
            }
        };

        let auth_header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        Box::pin(async move {
            let header = auth_header.ok_or_else(|| {
                AppError::Unauthorized("Missing Authorization header".to_string())
            })?;

            if !header.starts_with("Bearer ") {
                return Err(AppError::Unauthorized(
                    "Invalid Authorization header format, expected 'Bearer <token>'".to_string(),
                ));
            }

            let token_str = header["Bearer ".len()..].trim();

            if !is_valid_token_format(token_str) {
                return Err(AppError::Unauthorized(
                    "Malformed Bearer token, must be 40 lowercase hex chars".to_string(),
                ));
            }

            // Lookup token in database
            let token = AuthTokenService::get_by_token(pool.get_ref(), token_str)
                .await?
                .ok_or_else(|| AppError::Unauthorized("Invalid Bearer token".to_string()))?;

            // Update last_used_at asynchronously (fire and forget)
            let pool_clone = pool.clone();
            let token_id = token.id;
            tokio::spawn(async move {
                let _ = AuthTokenService::update_last_used(pool_clone.get_ref(), token_id).await;
            });

            Ok(AuthenticatedUser {
                user_id: token.user_id,
                token,
            })
        })
    }
}
