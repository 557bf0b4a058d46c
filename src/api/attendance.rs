use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{AttendanceCreate, AttendanceStatusUpdate, DEFAULT_ATTENDANCE_LIMIT, Pagination};
use crate::repository::{attendance as repo, employee};

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendanceCreate,
    responses(
        (status = 201, description = "Attendance marked", body = crate::model::attendance::Attendance),
        (status = 400, description = "Already marked for that day", body = Object, example = json!({
            "detail": "Attendance already marked for employee 1 on 2024-01-10"
        })),
        (status = 404, description = "Employee not found"),
        (status = 422, description = "Invalid payload")
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<AttendanceCreate>,
) -> Result<HttpResponse, AppError> {
    let record = repo::create_attendance(pool.get_ref(), &payload).await?;

    Ok(HttpResponse::Created().json(record))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(Pagination),
    responses(
        (status = 200, description = "Attendance, newest date first", body = [crate::model::attendance::Attendance]),
        (status = 422, description = "Invalid skip or limit")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<Pagination>,
) -> Result<HttpResponse, AppError> {
    let records = repo::list_all_attendance(
        pool.get_ref(),
        query.skip(),
        query.limit_or(DEFAULT_ATTENDANCE_LIMIT),
    )
    .await?;

    Ok(HttpResponse::Ok().json(records))
}

#[utoipa::path(
    get,
    path = "/api/attendance/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Internal employee ID")
    ),
    responses(
        (status = 200, description = "Attendance of the employee, newest first", body = [crate::model::attendance::Attendance]),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();

    if employee::get_employee(pool.get_ref(), employee_id).await?.is_none() {
        return Err(AppError::employee_not_found(employee_id));
    }

    let records = repo::get_attendance_by_employee(pool.get_ref(), employee_id).await?;
    Ok(HttpResponse::Ok().json(records))
}

#[utoipa::path(
    get,
    path = "/api/attendance/date/{date}",
    params(
        ("date", Path, description = "ISO 8601 calendar date", example = "2024-01-10")
    ),
    responses(
        (status = 200, description = "Attendance of every employee on that day", body = [crate::model::attendance::Attendance]),
        (status = 422, description = "Not an ISO 8601 date")
    ),
    tag = "Attendance"
)]
pub async fn attendance_on_date(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("'{raw}' is not an ISO 8601 date (YYYY-MM-DD)")))?;

    let records = repo::get_attendance_by_date(pool.get_ref(), date).await?;

    Ok(HttpResponse::Ok().json(records))
}

/// Overwrite the status of one record
#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    request_body = AttendanceStatusUpdate,
    responses(
        (status = 200, description = "Updated record", body = crate::model::attendance::Attendance),
        (status = 404, description = "Attendance record not found", body = Object, example = json!({
            "detail": "Attendance record with ID 1 not found"
        })),
        (status = 422, description = "Unknown status")
    ),
    tag = "Attendance"
)]
pub async fn update_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<AttendanceStatusUpdate>,
) -> Result<HttpResponse, AppError> {
    let record = repo::update_attendance_status(pool.get_ref(), path.into_inner(), body.status).await?;

    Ok(HttpResponse::Ok().json(record))
}

#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted"),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    if !repo::delete_attendance(pool.get_ref(), id).await? {
        return Err(AppError::attendance_not_found(id));
    }

    Ok(HttpResponse::NoContent().finish())
}
