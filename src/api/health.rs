use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::warn;

use crate::db;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = Object, example = json!({
            "message": "HRMS Lite API",
            "version": "1.0.0",
            "docs": "/swagger-ui/"
        }))
    ),
    tag = "Health"
)]
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "HRMS Lite API",
        "version": VERSION,
        "docs": "/swagger-ui/"
    }))
}

/// Always 200; the body says whether the store answered.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health report", body = Object, example = json!({
            "status": "healthy",
            "database": "connected",
            "version": "1.0.0"
        }))
    ),
    tag = "Health"
)]
#[get("/health")]
pub async fn health(pool: web::Data<SqlitePool>) -> impl Responder {
    match db::ping(pool.get_ref()).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "healthy",
            "database": "connected",
            "version": VERSION
        })),
        Err(e) => {
            warn!(error = %e, "Health check could not reach the database");
            HttpResponse::Ok().json(json!({
                "status": "unhealthy",
                "database": "disconnected",
                "error": e.to_string()
            }))
        }
    }
}
