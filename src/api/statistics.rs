use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::repository::statistics as repo;

#[utoipa::path(
    get,
    path = "/api/statistics/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Internal employee ID")
    ),
    responses(
        (status = 200, description = "Present/absent totals", body = crate::model::statistics::AttendanceSummary),
        (status = 404, description = "Employee not found")
    ),
    tag = "Statistics"
)]
pub async fn employee_statistics(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let summary = repo::employee_summary(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(summary))
}

#[utoipa::path(
    get,
    path = "/api/statistics/dashboard",
    responses(
        (status = 200, description = "Global counts and today's split", body = crate::model::statistics::DashboardSummary)
    ),
    tag = "Statistics"
)]
pub async fn dashboard_statistics(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let summary = repo::dashboard_summary(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(summary))
}
