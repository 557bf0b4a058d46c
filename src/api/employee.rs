use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{DEFAULT_EMPLOYEE_LIMIT, EmployeeCreate, NewEmployee, Pagination};
use crate::repository::employee as repo;

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeeCreate,
    responses(
        (status = 201, description = "Employee created", body = crate::model::employee::Employee),
        (status = 400, description = "Employee ID or email already exists", body = Object, example = json!({
            "detail": "Employee ID 'E001' already exists"
        })),
        (status = 422, description = "Invalid payload", body = Object, example = json!({
            "detail": "email: email is not a valid email address"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<EmployeeCreate>,
) -> Result<HttpResponse, AppError> {
    let new = NewEmployee::try_from(payload.into_inner())?;
    let employee = repo::create_employee(pool.get_ref(), &new).await?;

    Ok(HttpResponse::Created().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    params(Pagination),
    responses(
        (status = 200, description = "Employees in insertion order", body = [crate::model::employee::Employee]),
        (status = 422, description = "Invalid skip or limit")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<Pagination>,
) -> Result<HttpResponse, AppError> {
    let employees = repo::list_employees(
        pool.get_ref(),
        query.skip(),
        query.limit_or(DEFAULT_EMPLOYEE_LIMIT),
    )
    .await?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID, with its attendance records
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Internal employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = crate::model::employee::EmployeeWithAttendance),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee with ID 1 not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let employee = repo::get_employee_with_attendance(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee and all of its attendance
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Internal employee ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee with ID 1 not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    if !repo::delete_employee(pool.get_ref(), id).await? {
        return Err(AppError::employee_not_found(id));
    }

    Ok(HttpResponse::NoContent().finish())
}
