use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Serialize;

use crate::db::{self, DbPool};

/// Liveness body. Anything that can actually fail belongs in readiness.
#[derive(Serialize)]
struct Alive {
    status: &'static str,
}

/// Per-dependency verdict in the readiness body
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum DependencyStatus {
    Ok,
    Error,
}

/// Readiness body: overall verdict plus per-dependency detail
#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    checks: ReadinessChecks,
}

#[derive(Serialize)]
struct ReadinessChecks {
    database: DependencyStatus,
}

/// GET /health
/// Answers 200 whenever the process is up, regardless of dependencies.
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(Alive { status: "ok" })
}

/// GET /health/ready
/// Pings the database the flashcard store and quota accounting run on.
/// 503 until the pool answers, so load balancers hold traffic back
/// during startup and outages.
pub async fn readiness(pool: web::Data<DbPool>) -> HttpResponse {
    let (status, database, code) = if db::ping(pool.get_ref()).await {
        ("ready", DependencyStatus::Ok, StatusCode::OK)
    } else {
        (
            "not_ready",
            DependencyStatus::Error,
            StatusCode::SERVICE_UNAVAILABLE,
        )
    };

    HttpResponse::build(code).json(Readiness {
        status,
        checks: ReadinessChecks { database },
    })
}
